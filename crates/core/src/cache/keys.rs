use crate::book::BookId;
use crate::storage::Page;

/// Prefix shared by every cached list page.
pub const BOOK_LIST_PREFIX: &str = "book-list:";

/// Prefixes whose keys are indexed by backends that cannot cheaply scan
/// their keyspace.
pub const TRACKED_PREFIXES: &[&str] = &[BOOK_LIST_PREFIX];

/// Returns the cache key for a single book.
pub fn book_key(id: BookId) -> String {
    format!("book:{}", id)
}

/// Returns the cache key for a page of the book list.
pub fn book_list_key(page: Page) -> String {
    format!("{}{}:{}", BOOK_LIST_PREFIX, page.offset, page.limit)
}

/// Returns the tracked prefix a key falls under, if any.
///
/// # Examples
///
/// ```
/// use bookshelf_core::cache::{book_key, book_list_key, tracked_prefix, BOOK_LIST_PREFIX};
/// use bookshelf_core::storage::Page;
///
/// assert_eq!(tracked_prefix(&book_list_key(Page::new(0, 10))), Some(BOOK_LIST_PREFIX));
/// assert_eq!(tracked_prefix(&book_key(7)), None);
/// ```
pub fn tracked_prefix(key: &str) -> Option<&'static str> {
    TRACKED_PREFIXES
        .iter()
        .copied()
        .find(|prefix| key.starts_with(prefix))
}

/// Returns the key of the set indexing all keys stored under `prefix`.
pub fn tracking_key(prefix: &str) -> String {
    format!("_keys:{}", prefix)
}
