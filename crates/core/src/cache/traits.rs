use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Values are opaque bytes; callers own (de)serialization. A cache is an
/// optimization only, so callers are expected to treat errors as misses.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every value whose key starts with `prefix`.
    async fn delete_prefix(&self, prefix: &str) -> Result<()>;
}
