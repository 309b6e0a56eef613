//! # Screen Controller
//!
//! One actor per mounted screen. It owns the screen's [`ScreenSnapshot`], runs fetch
//! cycles described by a [`FetchPlan`], and publishes every state change on a `watch`
//! channel.
//!
//! ```text
//!  ScreenHandle ──Initiate(key)/Retry──▶ ScreenController ──spawn──▶ fetch task
//!       ▲                                   │    ▲                       │
//!       └──────── watch<ScreenSnapshot> ────┘    └── Completion{cycle,key}┘
//! ```
//!
//! Rules the controller keeps:
//!
//! - A cycle starts on `initiate` with a key different from the current one, or on
//!   `retry`. The same key again is ignored.
//! - Each completion carries the cycle number and key that started it. Anything not
//!   matching the current cycle is counted in `discarded` and dropped.
//! - A key the plan refuses (blank slug) starts a cycle without a fetch, so the screen
//!   stays `Pending`.
//! - Each fetch is bounded by the configured timeout (`Transient` on expiry). A panic in
//!   the fetch becomes `Unexpected`.
//! - Dropping or unmounting the handle ends the controller. Fetches still in flight run to
//!   completion and their results go nowhere.

use super::state::{ScreenSnapshot, ViewError, ViewState};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// How a screen loads its data for a route key.
#[async_trait]
pub trait FetchPlan: Send + Sync + 'static {
    type Key: Clone + PartialEq + Debug + Send + Sync + 'static;
    type Data: Clone + Debug + Send + Sync + 'static;

    /// Screen name used in logs.
    const SCREEN: &'static str;

    /// Whether `key` is usable. Unusable keys never reach [`fetch`](Self::fetch).
    fn accepts(&self, _key: &Self::Key) -> bool {
        true
    }

    async fn fetch(&self, key: Self::Key) -> Result<Self::Data, ViewError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreenError {
    #[error("Screen is no longer mounted")]
    Unmounted,
}

pub type Snapshot<P> = ScreenSnapshot<<P as FetchPlan>::Key, <P as FetchPlan>::Data>;

enum Command<K> {
    Initiate { key: K, ack: oneshot::Sender<u64> },
    Retry { ack: oneshot::Sender<u64> },
}

struct Completion<P: FetchPlan> {
    cycle: u64,
    key: P::Key,
    result: Result<P::Data, ViewError>,
}

/// Owns one screen's view state.
pub struct ScreenController<P: FetchPlan> {
    plan: Arc<P>,
    timeout: Duration,
    commands: mpsc::Receiver<Command<P::Key>>,
    completions: mpsc::UnboundedReceiver<Completion<P>>,
    completion_tx: mpsc::UnboundedSender<Completion<P>>,
    state: watch::Sender<Snapshot<P>>,
    snapshot: Snapshot<P>,
}

impl<P: FetchPlan> ScreenController<P> {
    /// Creates the controller and its handle. Nothing runs until [`run`](Self::run).
    pub fn new(plan: P, timeout: Duration) -> (Self, ScreenHandle<P>) {
        let (command_tx, commands) = mpsc::channel(16);
        let (completion_tx, completions) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(ScreenSnapshot::default());
        let controller = Self {
            plan: Arc::new(plan),
            timeout,
            commands,
            completions,
            completion_tx,
            state,
            snapshot: ScreenSnapshot::default(),
        };
        let handle = ScreenHandle {
            commands: command_tx,
            state: state_rx,
        };
        (controller, handle)
    }

    /// Spawns a controller for `plan` and returns its handle.
    pub fn mount(plan: P, timeout: Duration) -> ScreenHandle<P> {
        let (controller, handle) = Self::new(plan, timeout);
        tokio::spawn(controller.run());
        handle
    }

    pub async fn run(mut self) {
        debug!(screen = P::SCREEN, "Screen mounted");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Initiate { key, ack }) => {
                        self.initiate(key);
                        let _ = ack.send(self.snapshot.cycle);
                    }
                    Some(Command::Retry { ack }) => {
                        self.retry();
                        let _ = ack.send(self.snapshot.cycle);
                    }
                    None => break,
                },
                Some(done) = self.completions.recv() => self.complete(done),
            }
        }
        info!(
            screen = P::SCREEN,
            cycle = self.snapshot.cycle,
            "Screen unmounted"
        );
    }

    fn initiate(&mut self, key: P::Key) {
        if self.snapshot.key.as_ref() == Some(&key) {
            debug!(screen = P::SCREEN, ?key, "Same key, ignored");
            return;
        }
        self.start_cycle(key);
    }

    fn retry(&mut self) {
        match self.snapshot.key.clone() {
            Some(key) => self.start_cycle(key),
            None => debug!(screen = P::SCREEN, "Retry before initiate, ignored"),
        }
    }

    fn start_cycle(&mut self, key: P::Key) {
        self.snapshot.cycle += 1;
        self.snapshot.key = Some(key.clone());
        self.snapshot.state = ViewState::Pending;
        let cycle = self.snapshot.cycle;

        if self.plan.accepts(&key) {
            info!(screen = P::SCREEN, cycle, ?key, "Fetch started");
            self.spawn_fetch(cycle, key);
        } else {
            debug!(screen = P::SCREEN, cycle, ?key, "No usable key, staying pending");
        }
        self.publish();
    }

    fn spawn_fetch(&self, cycle: u64, key: P::Key) {
        let plan = self.plan.clone();
        let timeout = self.timeout;
        let completions = self.completion_tx.clone();
        let fetch_key = key.clone();

        tokio::spawn(async move {
            let fetch = tokio::spawn(async move { plan.fetch(fetch_key).await });
            let result = match tokio::time::timeout(timeout, fetch).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_error)) => Err(ViewError::Unexpected(join_error.to_string())),
                Err(_) => Err(ViewError::Transient(format!(
                    "no response within {} ms",
                    timeout.as_millis()
                ))),
            };
            // Fails only once the controller is gone.
            let _ = completions.send(Completion { cycle, key, result });
        });
    }

    fn complete(&mut self, done: Completion<P>) {
        let current =
            done.cycle == self.snapshot.cycle && self.snapshot.key.as_ref() == Some(&done.key);
        if !current {
            self.snapshot.discarded += 1;
            debug!(
                screen = P::SCREEN,
                cycle = done.cycle,
                current = self.snapshot.cycle,
                key = ?done.key,
                "Stale result discarded"
            );
            self.publish();
            return;
        }

        self.snapshot.state = match done.result {
            Ok(data) => {
                info!(screen = P::SCREEN, cycle = done.cycle, "Ready");
                ViewState::Ready(data)
            }
            Err(error) => {
                warn!(
                    screen = P::SCREEN,
                    cycle = done.cycle,
                    key = ?done.key,
                    %error,
                    "Fetch failed"
                );
                ViewState::Failed(error)
            }
        };
        self.publish();
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot.clone());
    }
}

/// The mounted screen's side of the controller.
///
/// Dropping the handle (or calling [`unmount`](Self::unmount)) ends the controller.
pub struct ScreenHandle<P: FetchPlan> {
    commands: mpsc::Sender<Command<P::Key>>,
    state: watch::Receiver<Snapshot<P>>,
}

impl<P: FetchPlan> ScreenHandle<P> {
    /// Navigates to `key`. Returns the cycle now current, which is unchanged when `key`
    /// is already current.
    pub async fn initiate(&self, key: P::Key) -> Result<u64, ScreenError> {
        let (ack, cycle) = oneshot::channel();
        self.send(Command::Initiate { key, ack }).await?;
        cycle.await.map_err(|_| ScreenError::Unmounted)
    }

    /// Refetches the current key as a new cycle.
    pub async fn retry(&self) -> Result<u64, ScreenError> {
        let (ack, cycle) = oneshot::channel();
        self.send(Command::Retry { ack }).await?;
        cycle.await.map_err(|_| ScreenError::Unmounted)
    }

    async fn send(&self, command: Command<P::Key>) -> Result<(), ScreenError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ScreenError::Unmounted)
    }

    pub fn snapshot(&self) -> Snapshot<P> {
        self.state.borrow().clone()
    }

    /// A receiver that sees every published snapshot.
    pub fn watch(&self) -> watch::Receiver<Snapshot<P>> {
        self.state.clone()
    }

    /// Waits until the current cycle leaves `Pending`.
    pub async fn wait_settled(&self) -> Result<Snapshot<P>, ScreenError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|snapshot| !snapshot.state.is_pending())
            .await
            .map_err(|_| ScreenError::Unmounted)?;
        Ok(settled.clone())
    }

    /// Ends the controller. Equivalent to dropping the handle.
    pub fn unmount(self) {
        drop(self);
    }
}
