//! Redis pub/sub event bus.
//!
//! Events are published as JSON to a Redis channel named after the topic.
//! Each subscribed topic runs one background task that forwards decoded
//! messages into a local broadcast channel.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};

use bookshelf_core::events::{
    decode_event, encode_event, BookEvent, EventPublisher, EventSubscriber, Result,
};

use crate::cache::redis_impl::map_redis_publish_error;

const CHANNEL_CAPACITY: usize = 100;

type Subscriptions = Arc<RwLock<HashMap<String, broadcast::Sender<BookEvent>>>>;

/// Redis pub/sub backend for cross-process event delivery.
pub struct RedisEventBus {
    client: redis::Client,
    conn: redis::aio::ConnectionManager,
    subscriptions: Subscriptions,
}

impl RedisEventBus {
    /// Connects to Redis at `url`.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_publish_error)?;
        let conn = redis::aio::ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_publish_error)?;

        Ok(Self {
            client,
            conn,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisEventBus {
    async fn publish(&self, topic: &str, event: &BookEvent) -> Result<()> {
        let payload = encode_event(event)?;

        let mut conn = self.conn.clone();
        let receivers: i64 = conn
            .publish(topic, &payload)
            .await
            .map_err(map_redis_publish_error)?;

        tracing::trace!(topic, event = event.kind(), receivers, "Published event");
        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for RedisEventBus {
    async fn subscribe(&self, topic: &str) -> Result<broadcast::Receiver<BookEvent>> {
        {
            let subscriptions = self.subscriptions.read().await;
            if let Some(sender) = subscriptions.get(topic) {
                return Ok(sender.subscribe());
            }
        }

        // Subscribe before returning so nothing published afterwards is missed.
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(map_redis_publish_error)?;
        pubsub
            .subscribe(topic)
            .await
            .map_err(map_redis_publish_error)?;

        // Registered only once SUBSCRIBE succeeded. A concurrent caller that
        // won the race keeps its channel and this connection is dropped.
        let (tx, rx) = {
            let mut subscriptions = self.subscriptions.write().await;
            if let Some(sender) = subscriptions.get(topic) {
                return Ok(sender.subscribe());
            }
            let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
            subscriptions.insert(topic.to_string(), tx.clone());
            (tx, rx)
        };

        let topic = topic.to_string();
        let subscriptions = Arc::clone(&self.subscriptions);

        tokio::spawn(async move {
            let mut stream = pubsub.on_message();

            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!(topic = %topic, error = %err, "Unreadable event payload");
                        continue;
                    }
                };

                match decode_event(&payload) {
                    Ok(event) => {
                        let _ = tx.send(event);
                    }
                    Err(err) => {
                        tracing::warn!(topic = %topic, error = %err, payload = %payload, "Failed to decode event");
                    }
                }
            }

            tracing::info!(topic = %topic, "Redis subscription stream ended");
            subscriptions.write().await.remove(&topic);
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::book::{Book, BookPatch};
    use std::time::Duration;
    use uuid::Uuid;

    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    async fn get_test_bus() -> Option<RedisEventBus> {
        RedisEventBus::new(&redis_url()).await.ok()
    }

    fn test_topic() -> String {
        format!("test:book_events:{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_redis_publish_and_receive() {
        let Some(bus) = get_test_bus().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let topic = test_topic();
        let mut receiver = bus.subscribe(&topic).await.unwrap();

        let event = BookEvent::created(&Book::new(1, "Dune", "Herbert", 1965));
        bus.publish(&topic, &event).await.unwrap();

        let received = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
            .await
            .expect("timed out waiting for event")
            .unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_redis_failed_subscribe_registers_nothing() {
        let Some(mut bus) = get_test_bus().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };
        let topic = test_topic();

        let reachable = std::mem::replace(
            &mut bus.client,
            redis::Client::open("redis://127.0.0.1:1").unwrap(),
        );
        assert!(bus.subscribe(&topic).await.is_err());
        assert!(bus.subscriptions.read().await.get(&topic).is_none());

        bus.client = reachable;
        let mut receiver = bus.subscribe(&topic).await.unwrap();
        let event = BookEvent::deleted(3);
        bus.publish(&topic, &event).await.unwrap();

        let received = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
            .await
            .expect("timed out waiting for event")
            .unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_redis_subscribers_share_channel() {
        let Some(bus) = get_test_bus().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let topic = test_topic();
        let mut first = bus.subscribe(&topic).await.unwrap();
        let mut second = bus.subscribe(&topic).await.unwrap();

        let event = BookEvent::updated(2, &BookPatch::default().with_year(1970));
        bus.publish(&topic, &event).await.unwrap();

        for receiver in [&mut first, &mut second] {
            let received = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
                .await
                .expect("timed out waiting for event")
                .unwrap();
            assert_eq!(received, event);
        }
    }
}
