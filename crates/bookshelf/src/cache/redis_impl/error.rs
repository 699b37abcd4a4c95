//! Redis error mapping to the core error types.

use bookshelf_core::cache::CacheError;
use bookshelf_core::events::PublishError;

fn is_connection_error(err: &redis::RedisError) -> bool {
    err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped()
}

/// Maps Redis errors to CacheError.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if is_connection_error(&err) {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

/// Maps Redis errors to PublishError.
pub fn map_redis_publish_error(err: redis::RedisError) -> PublishError {
    if is_connection_error(&err) {
        PublishError::ConnectionFailed(err.to_string())
    } else {
        PublishError::SendFailed(err.to_string())
    }
}
