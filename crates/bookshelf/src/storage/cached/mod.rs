//! Cached repository decorator.
//!
//! `CachedBookRepository` implements `BookRepository` by wrapping another
//! `BookRepository` and a `Cache`:
//!
//! - **Reads**: check the cache, on miss fetch from the store and populate
//! - **Writes**: persist to the store, then invalidate
//!
//! ```ignore
//! let repo = Arc::new(SqliteRepository::new("bookshelf.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let books = CachedBookRepository::new(repo, cache, Duration::from_secs(600));
//! ```

mod book;

pub use book::CachedBookRepository;
