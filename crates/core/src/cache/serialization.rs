//! Pure functions for serializing/deserializing books to/from cache bytes.
//!
//! Cache values are JSON so they stay readable from `redis-cli`.

use thiserror::Error;

use crate::book::Book;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a single book to JSON bytes.
pub fn serialize_book(book: &Book) -> Result<Vec<u8>> {
    serde_json::to_vec(book).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a single book.
pub fn deserialize_book(bytes: &[u8]) -> Result<Book> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a page of books to JSON bytes.
pub fn serialize_books(books: &[Book]) -> Result<Vec<u8>> {
    serde_json::to_vec(books).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a page of books.
pub fn deserialize_books(bytes: &[u8]) -> Result<Vec<Book>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
