use thiserror::Error;

/// Errors returned by event publishers and subscribers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Event transport connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Failed to send event: {0}")]
    SendFailed(String),
    #[error("Failed to encode event: {0}")]
    Encoding(String),
}

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, PublishError>;
