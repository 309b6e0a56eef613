//! # Mock Store
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are answered from a
//! queue of expectations instead of a running [`RecordStore`](crate::RecordStore). Use it
//! to test a domain client, or a record whose hooks call another store, without the other
//! store's state.
//!
//! | | `MockStore` | Real store |
//! |---|---|---|
//! | State | none, scripted replies | real records |
//! | Error injection | `return_err` | needs a record in the failing state |
//! | Use | logic *around* a client | the record impl or the whole system |
//!
//! ```rust
//! use grocer_store::mock::MockStore;
//! use grocer_store::{Record, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bin { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
//!
//! #[async_trait]
//! impl Record for Bin {
//!     type Id = u32; type Draft = (); type Patch = (); type Filter = ();
//!     type Action = (); type Outcome = (); type Context = (); type Error = BinError;
//!     fn from_draft(id: u32, _: ()) -> Result<Self, BinError> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Bin>::new();
//!     mock.expect_get(1).return_err(StoreError::Closed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(StoreError::Closed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control (inspect the payload, then answer), use
//! [`create_mock_client`] with [`expect_create`], [`expect_get`], [`expect_list`] or
//! [`expect_action`].

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted reply, matched to incoming requests in FIFO order.
enum Expectation<T: Record> {
    Create(Result<T::Id, StoreError>),
    Get(T::Id, Result<Option<T>, StoreError>),
    List(Result<Vec<T>, StoreError>),
    Update(T::Id, Result<T, StoreError>),
    Delete(T::Id, Result<(), StoreError>),
    Action(T::Id, Result<T::Outcome, StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// Answers store requests from a queue of expectations.
///
/// A request that does not match the next expectation (wrong kind or wrong id) panics
/// the mock task, which the caller sees as [`StoreError::Dropped`].
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get(want, r))) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(want, r)),
                    ) => {
                        assert_eq!(id, want, "update called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(want, r)),
                    ) => {
                        assert_eq!(id, want, "delete called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action(want, r)),
                    ) => {
                        assert_eq!(id, want, "action called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |r| Expectation::Get(id, r))
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |r| Expectation::Delete(id, r))
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::Outcome> {
        self.builder(move |r| Expectation::Action(id, r))
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }
}

/// Completes one expectation with either a value or an error.
pub struct ExpectationBuilder<T: Record, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// STEP-BY-STEP HELPERS
// =============================================================================

/// A client plus the raw request receiver, for tests that answer requests by hand.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Draft, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Option<T::Filter>, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::Outcome, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tote {
        id: u32,
        weight: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tote error")]
    struct ToteError;

    #[async_trait]
    impl Record for Tote {
        type Id = u32;
        type Draft = u32;
        type Patch = u32;
        type Filter = u32;
        type Action = ();
        type Outcome = u32;
        type Context = ();
        type Error = ToteError;

        fn from_draft(id: u32, weight: u32) -> Result<Self, ToteError> {
            Ok(Self { id, weight })
        }
        fn matches(&self, min: &u32) -> bool {
            self.weight >= *min
        }
        async fn on_update(&mut self, weight: u32, _: &()) -> Result<(), ToteError> {
            self.weight = weight;
            Ok(())
        }
        async fn handle_action(&mut self, _: (), _: &()) -> Result<u32, ToteError> {
            Ok(self.weight)
        }
    }

    #[tokio::test]
    async fn test_step_by_step_create_and_list() {
        let (client, mut receiver) = create_mock_client::<Tote>(4);

        let task = tokio::spawn(async move {
            let id = client.create(12).await?;
            let heavy = client.list(Some(10)).await?;
            Ok::<_, StoreError>((id, heavy))
        });

        let (draft, responder) = expect_create(&mut receiver).await.expect("create");
        assert_eq!(draft, 12);
        responder.send(Ok(7)).unwrap();

        let (filter, responder) = expect_list(&mut receiver).await.expect("list");
        assert_eq!(filter, Some(10));
        responder.send(Ok(vec![Tote { id: 7, weight: 12 }])).unwrap();

        let (id, heavy) = task.await.unwrap().unwrap();
        assert_eq!(id, 7);
        assert_eq!(heavy, vec![Tote { id: 7, weight: 12 }]);
    }

    #[tokio::test]
    async fn test_expectations_are_served_in_order() {
        let mut mock = MockStore::<Tote>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Tote { id: 1, weight: 3 }));
        mock.expect_action(1).return_err(StoreError::NotFound("1".into()));

        let client = mock.client();
        assert_eq!(client.create(3).await.unwrap(), 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().weight, 3);
        assert!(matches!(
            client.perform_action(1, ()).await,
            Err(StoreError::NotFound(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_drops_reply() {
        let mut mock = MockStore::<Tote>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().delete(4).await;
        assert!(matches!(result, Err(StoreError::Dropped)));
    }
}
