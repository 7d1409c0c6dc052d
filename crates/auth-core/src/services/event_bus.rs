//! In-process notification bus

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::Notification;
use crate::repositories::{NotifyError, Notifier};

/// Broadcast channel; every subscriber sees every notification published
/// after it subscribed.
pub struct EventBus {
    tx: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl Notifier for EventBus {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        let notification = Notification {
            channel: channel.to_string(),
            event: event.to_string(),
            payload,
        };
        match self.tx.send(notification) {
            Ok(receivers) => debug!("Published {}/{} to {} subscribers", channel, event, receivers),
            // No subscribers is not a delivery failure.
            Err(_) => warn!("Published {}/{} with no subscribers", channel, event),
        }
        Ok(())
    }
}

/// Publishes to every inner notifier, failing if any of them fails.
pub struct FanoutNotifier {
    targets: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new(targets: Vec<Arc<dyn Notifier>>) -> Self {
        Self { targets }
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        for target in &self.targets {
            target.publish(channel, event, payload.clone()).await?;
        }
        Ok(())
    }
}
