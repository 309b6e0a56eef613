//! # Record Store
//!
//! The server half of a store: a Tokio task that owns every record of one type and
//! answers [`StoreRequest`]s one at a time. Because the loop owns the map exclusively,
//! there is no `Mutex` around it.
//!
//! ```rust
//! use grocer_store::{Record, RecordStore};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Aisle { id: u32, name: String }
//! #[derive(Debug)] struct AisleDraft { name: String }
//! #[derive(Debug, thiserror::Error)] #[error("aisle error")] struct AisleError;
//!
//! #[async_trait]
//! impl Record for Aisle {
//!     type Id = u32; type Draft = AisleDraft; type Patch = (); type Filter = ();
//!     type Action = (); type Outcome = (); type Context = (); type Error = AisleError;
//!     fn from_draft(id: u32, d: AisleDraft) -> Result<Self, AisleError> { Ok(Self { id, name: d.name }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), AisleError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), AisleError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = RecordStore::<Aisle>::new(8);
//!     tokio::spawn(store.run(()));
//!     let id = client.create(AisleDraft { name: "Produce".into() }).await.unwrap();
//!     assert_eq!(client.get(id).await.unwrap().unwrap().name, "Produce");
//! }
//! ```

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the records of type `T` and serves requests sequentially.
///
/// Ids come from an internal `u32` counter starting at 1, and records live in a
/// `BTreeMap`, so `List` returns them in creation order.
pub struct RecordStore<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Record> RecordStore<T> {
    /// Creates the store and its client. `buffer_size` bounds queued requests.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        (store, StoreClient::new(sender))
    }

    /// Runs the request loop until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::Create { draft, respond_to } => {
                    debug!(record_type, ?draft, "Create");
                    let id = T::Id::from(self.next_id);
                    let result = self.create(id, draft, &context).await;
                    match &result {
                        Ok(id) => info!(record_type, %id, size = self.records.len(), "Created"),
                        Err(e) => warn!(record_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(record_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { filter, respond_to } => {
                    let records: Vec<T> = self
                        .records
                        .values()
                        .filter(|r| filter.as_ref().map_or(true, |f| r.matches(f)))
                        .cloned()
                        .collect();
                    debug!(record_type, ?filter, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?patch, "Update");
                    let result = self.update(&id, patch, &context).await;
                    match &result {
                        Ok(_) => info!(record_type, %id, "Updated"),
                        Err(e) => warn!(record_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, %id, "Delete");
                    let result = match self.records.get(&id) {
                        Some(record) => match record.on_delete(&context).await {
                            Ok(()) => {
                                self.records.remove(&id);
                                info!(record_type, %id, size = self.records.len(), "Deleted");
                                Ok(())
                            }
                            Err(e) => {
                                warn!(record_type, %id, error = %e, "on_delete failed");
                                Err(StoreError::record(e))
                            }
                        },
                        None => {
                            warn!(record_type, %id, "Not found");
                            Err(StoreError::NotFound(id.to_string()))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?action, "Action");
                    let result = match self.records.get_mut(&id) {
                        Some(record) => record
                            .handle_action(action, &context)
                            .await
                            .map_err(StoreError::record),
                        None => Err(StoreError::NotFound(id.to_string())),
                    };
                    match &result {
                        Ok(_) => info!(record_type, %id, "Action ok"),
                        Err(e) => warn!(record_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(record_type, size = self.records.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        draft: T::Draft,
        context: &T::Context,
    ) -> Result<T::Id, StoreError> {
        let mut record = T::from_draft(id.clone(), draft).map_err(StoreError::record)?;
        self.ensure_unique(&record, None)?;
        record.on_create(context).await.map_err(StoreError::record)?;
        // Ids are only consumed by records that made it into the store.
        self.next_id += 1;
        self.records.insert(id.clone(), record);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        patch: T::Patch,
        context: &T::Context,
    ) -> Result<T, StoreError> {
        let mut candidate = self
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        candidate
            .on_update(patch, context)
            .await
            .map_err(StoreError::record)?;
        self.ensure_unique(&candidate, Some(id))?;
        self.records.insert(id.clone(), candidate.clone());
        Ok(candidate)
    }

    fn ensure_unique(&self, record: &T, except: Option<&T::Id>) -> Result<(), StoreError> {
        let Some(key) = record.unique_key() else {
            return Ok(());
        };
        let taken = self
            .records
            .iter()
            .filter(|(id, _)| Some(*id) != except)
            .any(|(_, other)| other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            Err(StoreError::Conflict(key))
        } else {
            Ok(())
        }
    }
}
