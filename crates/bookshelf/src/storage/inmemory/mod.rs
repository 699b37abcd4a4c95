//! In-memory storage backend for tests and local development.
//!
//! Books live in an ordered map behind a tokio `RwLock`; nothing is
//! persisted.

mod repository;

pub use repository::InMemoryRepository;
