//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! Constraint violations and empty lookups become their semantic variants.

use bookshelf_core::book::BookId;
use bookshelf_core::storage::RepositoryError;

const ENTITY: &str = "Book";

/// Maps a rusqlite error to a RepositoryError.
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::DuplicateKey`
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound`
/// - Open/busy/locked failures → `RepositoryError::ConnectionFailed`
/// - Everything else → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::DuplicateKey {
                entity_type: ENTITY,
                key: "unknown".to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::DatabaseBusy
                    | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type: ENTITY,
            id: "unknown".to_string(),
        },

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error for an operation on a known book ID.
pub fn map_tokio_rusqlite_error_with_id(err: tokio_rusqlite::Error, id: BookId) -> RepositoryError {
    match map_tokio_rusqlite_error(err) {
        RepositoryError::NotFound { .. } => RepositoryError::book_not_found(id),
        other => other,
    }
}

/// Maps a tokio_rusqlite error for a write of a known (title, author) pair.
pub fn map_tokio_rusqlite_error_with_key(
    err: tokio_rusqlite::Error,
    title: &str,
    author: &str,
) -> RepositoryError {
    match map_tokio_rusqlite_error(err) {
        RepositoryError::DuplicateKey { .. } => RepositoryError::duplicate_book(title, author),
        other => other,
    }
}
