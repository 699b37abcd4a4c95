//! Shared application state.
//!
//! Backends are chosen at compile time: one storage feature (`sqlite` or
//! `inmemory`) and one cache feature (`memory` or `redis`). The cache
//! feature also selects the event transport.

use std::sync::Arc;

use bookshelf_core::cache::Cache;
use bookshelf_core::events::{EventPublisher, EventSubscriber};
use bookshelf_core::storage::BookRepository;

use crate::config::Config;
use crate::service::BookService;
use crate::storage::CachedBookRepository;

/// Shared application state, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Book operations: cached repository plus event publication.
    pub books: Arc<BookService>,
}

/// Cache and event transport built for the active cache feature.
struct Transport {
    cache: Arc<dyn Cache>,
    publisher: Arc<dyn EventPublisher>,
    subscriber: Arc<dyn EventSubscriber>,
}

impl AppState {
    fn build<R>(repository: Arc<R>, transport: Transport, config: &Config) -> Self
    where
        R: BookRepository + 'static,
    {
        let cached = CachedBookRepository::new(repository, transport.cache, config.cache_ttl());
        let service = BookService::new(
            Arc::new(cached),
            transport.publisher,
            config.events_topic.clone(),
        );
        Self {
            books: Arc::new(service),
        }
    }

    /// Opens only the subscription side of the event transport, for
    /// processes that consume events without serving requests.
    pub async fn subscriber(config: &Config) -> Arc<dyn EventSubscriber> {
        #[cfg(feature = "memory")]
        tracing::warn!(
            "In-process event bus: this consumer only sees events published by its own process"
        );
        open_transport(config).await.subscriber
    }

    /// Creates the state with the compiled-in backends.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let repository = open_store(config).await?;
        let transport = open_transport(config).await;
        Ok(Self::build(repository, transport, config))
    }
}

#[cfg(feature = "sqlite")]
async fn open_store(config: &Config) -> Result<Arc<crate::storage::SqliteRepository>, anyhow::Error> {
    let repository = crate::storage::SqliteRepository::new(&config.sqlite_path).await?;
    tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
    Ok(Arc::new(repository))
}

#[cfg(feature = "inmemory")]
async fn open_store(
    _config: &Config,
) -> Result<Arc<crate::storage::InMemoryRepository>, anyhow::Error> {
    tracing::info!("Using in-memory storage");
    Ok(Arc::new(crate::storage::InMemoryRepository::new()))
}

#[cfg(feature = "memory")]
async fn open_transport(config: &Config) -> Transport {
    use crate::cache::MemoryCache;
    use crate::events::MemoryEventBus;

    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    let bus = Arc::new(MemoryEventBus::new());
    Transport {
        cache: Arc::new(MemoryCache::new(config.cache_max_entries)),
        publisher: bus.clone(),
        subscriber: bus,
    }
}

/// Connects the Redis cache and event bus. Either one failing to connect
/// degrades to its local stand-in instead of aborting startup.
#[cfg(feature = "redis")]
async fn open_transport(config: &Config) -> Transport {
    use crate::cache::{NoopCache, RedisCache};
    use crate::events::{MemoryEventBus, RedisEventBus};

    let cache: Arc<dyn Cache> = match RedisCache::new(&config.redis_url).await {
        Ok(cache) => {
            tracing::info!(url = %config.redis_url, "Using Redis cache");
            Arc::new(cache)
        }
        Err(err) => {
            tracing::warn!(url = %config.redis_url, error = %err, "Redis cache unavailable, caching disabled");
            Arc::new(NoopCache)
        }
    };

    let (publisher, subscriber) = match RedisEventBus::new(&config.redis_url).await {
        Ok(bus) => {
            let bus = Arc::new(bus);
            (
                bus.clone() as Arc<dyn EventPublisher>,
                bus as Arc<dyn EventSubscriber>,
            )
        }
        Err(err) => {
            tracing::warn!(url = %config.redis_url, error = %err, "Redis pub/sub unavailable, events stay in-process");
            let bus = Arc::new(MemoryEventBus::new());
            (
                bus.clone() as Arc<dyn EventPublisher>,
                bus as Arc<dyn EventSubscriber>,
            )
        }
    };

    Transport {
        cache,
        publisher,
        subscriber,
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::events::MemoryEventBus;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// In-memory state plus the bus its events are published on.
        pub fn with_event_bus() -> (Self, Arc<MemoryEventBus>) {
            let config = Config::default();
            let bus = Arc::new(MemoryEventBus::new());
            let transport = Transport {
                cache: Arc::new(MemoryCache::new(config.cache_max_entries)),
                publisher: bus.clone(),
                subscriber: bus.clone(),
            };
            let state = Self::build(Arc::new(InMemoryRepository::new()), transport, &config);
            (state, bus)
        }
    }

    impl Default for AppState {
        /// In-memory store, cache and event bus. No external dependencies.
        fn default() -> Self {
            Self::with_event_bus().0
        }
    }
}
