use thiserror::Error;

use crate::book::BookId;

/// Errors that can occur during repository operations.
///
/// This is the closed set of failures a caller can observe from any
/// [`BookRepository`](super::BookRepository), whatever the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {key}")]
    DuplicateKey {
        entity_type: &'static str,
        key: String,
    },
    /// Transient I/O failure talking to the store.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// NotFound for a book ID.
    pub fn book_not_found(id: BookId) -> Self {
        Self::NotFound {
            entity_type: "Book",
            id: id.to_string(),
        }
    }

    /// DuplicateKey for a (title, author) pair.
    pub fn duplicate_book(title: &str, author: &str) -> Self {
        Self::DuplicateKey {
            entity_type: "Book",
            key: format!("{title} by {author}"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
