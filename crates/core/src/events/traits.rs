use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{BookEvent, Result};

/// Fire-and-forget emission of change events.
///
/// Implementations make a single send attempt. Callers treat errors as
/// telemetry and never as a reason to fail the mutation that produced the
/// event.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, event: &BookEvent) -> Result<()>;
}

/// Subscription side of the event channel.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Subscribes to every event published on `topic` from now on.
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<BookEvent>>;
}
