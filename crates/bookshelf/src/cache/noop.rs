use std::time::Duration;

use async_trait::async_trait;

use bookshelf_core::cache::{Cache, Result};

/// Cache that stores nothing. Every read misses and every write succeeds.
///
/// Used when the configured cache backend is unreachable at startup so the
/// service keeps answering from the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<()> {
        Ok(())
    }
}
