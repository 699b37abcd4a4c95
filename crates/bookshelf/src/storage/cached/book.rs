//! Cached book repository decorator.
//!
//! Wraps a `BookRepository` with read-through caching and invalidate-on-write.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use bookshelf_core::book::{Book, BookId, BookPatch, NewBook};
use bookshelf_core::cache::{
    book_key, book_list_key, deserialize_book, deserialize_books, serialize_book,
    serialize_books, Cache, BOOK_LIST_PREFIX,
};
use bookshelf_core::storage::{BookRepository, Page, Result};

/// Cached book repository decorator.
///
/// - **Reads**: return a cached value when present and decodable; otherwise
///   read the store and cache the result for `ttl`. A `NotFound` lookup is
///   never cached.
/// - **Writes**: mutate the store first, then drop every cached list page
///   and, for updates and deletes, the book's own entry.
///
/// The cache is an optimization only. Every cache failure, including a
/// value that no longer decodes, is logged and treated as a miss.
///
/// A reader that repopulates the cache between a store write and its
/// invalidation can leave a stale entry behind until `ttl` expires.
pub struct CachedBookRepository<R, C>
where
    R: BookRepository,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedBookRepository<R, C>
where
    R: BookRepository,
    C: Cache + ?Sized,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    async fn cached_bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.cache.get(key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed");
                None
            }
        }
    }

    async fn store_bytes(&self, key: &str, bytes: &[u8]) {
        if let Err(err) = self.cache.set(key, bytes, Some(self.ttl)).await {
            tracing::warn!(key, error = %err, "Failed to populate cache");
        }
    }

    async fn invalidate(&self, id: Option<BookId>) {
        if let Err(err) = self.cache.delete_prefix(BOOK_LIST_PREFIX).await {
            tracing::warn!(prefix = BOOK_LIST_PREFIX, error = %err, "Failed to invalidate book lists");
        }

        if let Some(id) = id {
            let key = book_key(id);
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(book_id = id, error = %err, "Failed to invalidate book cache");
            }
        }
    }
}

#[async_trait]
impl<R, C> BookRepository for CachedBookRepository<R, C>
where
    R: BookRepository + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn get_books(&self, page: Page) -> Result<Vec<Book>> {
        let cache_key = book_list_key(page);

        if let Some(bytes) = self.cached_bytes(&cache_key).await {
            match deserialize_books(&bytes) {
                Ok(books) => {
                    tracing::trace!(offset = page.offset, limit = page.limit, "Cache hit for book list");
                    return Ok(books);
                }
                Err(err) => {
                    tracing::warn!(key = %cache_key, error = %err, "Cached book list is corrupt");
                }
            }
        }

        tracing::trace!(offset = page.offset, limit = page.limit, "Cache miss for book list");
        let books = self.repository.get_books(page).await?;

        // Empty pages are cached too; the TTL bounds how long they linger.
        match serialize_books(&books) {
            Ok(bytes) => self.store_bytes(&cache_key, &bytes).await,
            Err(err) => tracing::warn!(key = %cache_key, error = %err, "Failed to encode book list"),
        }

        Ok(books)
    }

    async fn get_book(&self, id: BookId) -> Result<Book> {
        let cache_key = book_key(id);

        if let Some(bytes) = self.cached_bytes(&cache_key).await {
            match deserialize_book(&bytes) {
                Ok(book) => {
                    tracing::trace!(book_id = id, "Cache hit for book");
                    return Ok(book);
                }
                Err(err) => {
                    tracing::warn!(book_id = id, error = %err, "Cached book is corrupt");
                }
            }
        }

        tracing::trace!(book_id = id, "Cache miss for book");
        let book = self.repository.get_book(id).await?;

        match serialize_book(&book) {
            Ok(bytes) => self.store_bytes(&cache_key, &bytes).await,
            Err(err) => tracing::warn!(book_id = id, error = %err, "Failed to encode book"),
        }

        Ok(book)
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let created = self.repository.create_book(book).await?;

        self.invalidate(None).await;

        tracing::debug!(book_id = created.id, title = %created.title, "Book created");
        Ok(created)
    }

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<()> {
        self.repository.update_book(id, patch).await?;

        self.invalidate(Some(id)).await;

        tracing::debug!(book_id = id, "Book updated");
        Ok(())
    }

    async fn delete_book(&self, id: BookId) -> Result<()> {
        self.repository.delete_book(id).await?;

        self.invalidate(Some(id)).await;

        tracing::debug!(book_id = id, "Book deleted");
        Ok(())
    }
}
