//! Browser-level events (installability, notification permission) as an explicit
//! subscribe/unsubscribe capability.
//!
//! A screen holds a [`Subscription`] for as long as it is mounted. Dropping it is the
//! unsubscribe; there is no separate call to forget.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The app can be installed; the prompt may be shown.
    InstallAvailable,
    Installed,
    NotificationPermission(Permission),
}

/// Fan-out of events to every live [`Subscription`].
pub struct EventHub<E> {
    sender: Mutex<Option<broadcast::Sender<E>>>,
}

impl<E: Clone + Send + 'static> EventHub<E> {
    /// `capacity` events are kept for a slow subscriber before it starts missing some.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Mutex::new(Some(sender)),
        }
    }

    /// Subscribes to events published from now on. After [`close`](Self::close) the
    /// subscription is already ended.
    pub fn subscribe(&self) -> Subscription<E> {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let receiver = match sender.as_ref() {
            Some(sender) => sender.subscribe(),
            None => {
                let (closed, receiver) = broadcast::channel(1);
                drop(closed);
                receiver
            }
        };
        Subscription { receiver }
    }

    /// Sends `event` to every live subscriber. Returns how many received it.
    pub fn publish(&self, event: E) -> usize {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref().map(|s| s.send(event)) {
            Some(Ok(delivered)) => delivered,
            _ => 0,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        sender.as_ref().map_or(0, |s| s.receiver_count())
    }

    /// Ends every subscription. Later publishes reach nobody.
    pub fn close(&self) {
        let closed = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if closed.is_some() {
            debug!("Event hub closed");
        }
    }
}

/// A live subscription. Dropping it unsubscribes.
pub struct Subscription<E> {
    receiver: broadcast::Receiver<E>,
}

impl<E: Clone> Subscription<E> {
    /// The next event, or `None` once the hub is closed. Events missed by a lagging
    /// subscriber are skipped.
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "Subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// An already-delivered event, if one is waiting.
    pub fn try_recv(&mut self) -> Option<E> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_live_subscribers() {
        let hub = EventHub::new(8);
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        assert_eq!(hub.publish(BrowserEvent::InstallAvailable), 2);
        assert_eq!(first.recv().await, Some(BrowserEvent::InstallAvailable));
        assert_eq!(second.recv().await, Some(BrowserEvent::InstallAvailable));
    }

    #[tokio::test]
    async fn test_dropping_subscription_unsubscribes() {
        let hub = EventHub::new(8);
        let kept = hub.subscribe();
        {
            let _screen = hub.subscribe();
            assert_eq!(hub.subscriber_count(), 2);
        }
        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(
            hub.publish(BrowserEvent::NotificationPermission(Permission::Granted)),
            1
        );
        drop(kept);
        assert_eq!(hub.publish(BrowserEvent::Installed), 0);
    }

    #[tokio::test]
    async fn test_close_ends_subscriptions() {
        let hub = EventHub::new(8);
        let mut subscription = hub.subscribe();
        hub.close();

        assert_eq!(subscription.recv().await, None);
        assert_eq!(hub.publish(BrowserEvent::Installed), 0);
        assert_eq!(hub.subscribe().recv().await, None);
    }
}
