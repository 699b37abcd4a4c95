//! Cache backend implementations.
//!
//! Concrete implementations of `bookshelf_core::cache::Cache`, selected at
//! compile time via feature flags:
//!
//! - `memory` (default): in-process LRU cache
//! - `redis`: Redis cache using the redis crate
//!
//! `NoopCache` stands in for Redis when it cannot be reached at startup.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p bookshelf --no-default-features --features sqlite,redis"
);

#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(any(test, feature = "redis"))]
mod noop;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use noop::NoopCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
