//! Storage backend implementations.
//!
//! Concrete implementations of `bookshelf_core::storage::BookRepository`,
//! selected at compile time via feature flags:
//!
//! - `sqlite` (default): SQLite using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: ordered map, nothing persisted
//!
//! The two are mutually exclusive. `cached` wraps whichever is active.
//!
//! ```bash
//! cargo build -p bookshelf --no-default-features --features inmemory,memory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p bookshelf --features sqlite"
);

pub mod cached;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedBookRepository;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
