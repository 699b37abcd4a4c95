mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    book_key, book_list_key, tracked_prefix, tracking_key, BOOK_LIST_PREFIX, TRACKED_PREFIXES,
};
pub use serialization::{
    deserialize_book, deserialize_books, serialize_book, serialize_books, SerializationError,
};
pub use traits::Cache;
