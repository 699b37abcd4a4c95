//! Redis cache implementation.
//!
//! Keys under a tracked prefix (see `bookshelf_core::cache::TRACKED_PREFIXES`)
//! are recorded in a Redis Set so that `delete_prefix` never scans the
//! keyspace. Other prefixes fall back to `KEYS`.
//!
//! Tracking is not atomic with the writes it indexes. A stale member left in
//! a tracking set only causes a `DEL` of a missing key later, which is a
//! no-op.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use bookshelf_core::cache::{tracked_prefix, tracking_key, Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using a connection manager.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis at `url` (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        if let Some(prefix) = tracked_prefix(key) {
            conn.sadd::<_, _, ()>(tracking_key(prefix), key)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        if let Some(prefix) = tracked_prefix(key) {
            conn.srem::<_, _, ()>(tracking_key(prefix), key)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        let index = (tracked_prefix(prefix) == Some(prefix)).then(|| tracking_key(prefix));

        let keys: Vec<String> = match &index {
            Some(index) => conn.smembers(index).await.map_err(map_redis_error)?,
            None => conn
                .keys(format!("{}*", prefix))
                .await
                .map_err(map_redis_error)?,
        };

        if !keys.is_empty() {
            conn.del::<_, ()>(&keys).await.map_err(map_redis_error)?;

            if let Some(index) = &index {
                conn.srem::<_, _, ()>(index, &keys)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        tracing::trace!(prefix, deleted = keys.len(), "Deleted cache prefix");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::cache::BOOK_LIST_PREFIX;
    use uuid::Uuid;

    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        RedisCache::new(&redis_url()).await.ok()
    }

    fn test_key(suffix: &str) -> String {
        format!("test:redis_cache:{}:{}", Uuid::new_v4(), suffix)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        cache.set(&key, b"dune", None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"dune".to_vec()));

        cache.delete(&key).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        cache
            .set(&key, b"short", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_delete_tracked_prefix() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let run = Uuid::new_v4();
        let first = format!("{}{}:0:10", BOOK_LIST_PREFIX, run);
        let second = format!("{}{}:10:10", BOOK_LIST_PREFIX, run);
        let single = test_key("book");

        cache.set(&first, b"[]", None).await.unwrap();
        cache.set(&second, b"[]", None).await.unwrap();
        cache.set(&single, b"{}", None).await.unwrap();

        cache.delete_prefix(BOOK_LIST_PREFIX).await.unwrap();

        assert!(cache.get(&first).await.unwrap().is_none());
        assert!(cache.get(&second).await.unwrap().is_none());
        assert!(cache.get(&single).await.unwrap().is_some());

        cache.delete(&single).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_untracked_prefix() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let prefix = format!("test:redis_prefix:{}:", Uuid::new_v4());
        let a = format!("{}a", prefix);
        let b = format!("{}b", prefix);
        let other = test_key("other");

        cache.set(&a, b"1", None).await.unwrap();
        cache.set(&b, b"2", None).await.unwrap();
        cache.set(&other, b"3", None).await.unwrap();

        cache.delete_prefix(&prefix).await.unwrap();

        assert!(cache.get(&a).await.unwrap().is_none());
        assert!(cache.get(&b).await.unwrap().is_none());
        assert!(cache.get(&other).await.unwrap().is_some());

        cache.delete(&other).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("binary");
        let value: Vec<u8> = vec![0, 159, 146, 150, 255];

        cache.set(&key, &value, None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(value));

        cache.delete(&key).await.unwrap();
    }
}
