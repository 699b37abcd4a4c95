//! Event publisher backends.
//!
//! The event transport follows the cache feature: `memory` delivers events
//! in-process, `redis` uses Redis pub/sub so that `bookshelf consume` in
//! another process sees them. The in-process bus is always built since it is
//! also the fallback when Redis is unreachable at startup.

mod memory;

#[cfg(feature = "redis")]
mod redis_impl;

pub use memory::MemoryEventBus;

#[cfg(feature = "redis")]
pub use redis_impl::RedisEventBus;
