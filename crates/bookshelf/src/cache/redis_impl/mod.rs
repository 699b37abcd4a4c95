//! Redis cache backend for multi-instance deployments.

mod cache;
mod error;

pub use cache::RedisCache;
pub use error::{map_redis_error, map_redis_publish_error};
