use async_trait::async_trait;

use crate::book::{Book, BookId, BookPatch, NewBook};

use super::{Page, Result};

/// Repository for book operations.
///
/// Implemented by the persistent stores and by the caching decorator that
/// wraps them, so callers never know whether a cache sits in between.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Gets a page of books ordered by ID.
    async fn get_books(&self, page: Page) -> Result<Vec<Book>>;

    /// Gets a book by its ID. Fails with `NotFound` if it does not exist.
    async fn get_book(&self, id: BookId) -> Result<Book>;

    /// Creates a new book and returns it with its assigned ID.
    ///
    /// Fails with `DuplicateKey` if a book with the same title and author
    /// already exists.
    async fn create_book(&self, book: &NewBook) -> Result<Book>;

    /// Applies a partial update to an existing book.
    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<()>;

    /// Deletes a book by its ID.
    async fn delete_book(&self, id: BookId) -> Result<()>;
}
