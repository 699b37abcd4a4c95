//! In-process event bus built on tokio broadcast channels.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use bookshelf_core::events::{BookEvent, EventPublisher, EventSubscriber, Result};

/// Channel capacity per topic.
const CHANNEL_CAPACITY: usize = 100;

/// In-memory event bus with one broadcast channel per topic.
///
/// Events published before anyone subscribes are dropped, matching a
/// fire-and-forget transport.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventBus {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<BookEvent>>>>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_or_create_channel(&self, topic: &str) -> broadcast::Sender<BookEvent> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(topic) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventBus {
    async fn publish(&self, topic: &str, event: &BookEvent) -> Result<()> {
        let sender = self.get_or_create_channel(topic).await;

        // No receivers is not an error.
        let receivers = sender.send(event.clone()).unwrap_or(0);
        tracing::trace!(topic, event = event.kind(), receivers, "Published event");

        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for MemoryEventBus {
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<BookEvent>> {
        let sender = self.get_or_create_channel(topic).await;
        Ok(sender.subscribe())
    }
}
