//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookshelf_core::book::{Book, BookId, BookPatch, NewBook};
use bookshelf_core::storage::{BookRepository, Page, RepositoryError, Result};

#[derive(Debug)]
struct Store {
    books: BTreeMap<BookId, Book>,
    next_id: BookId,
}

impl Store {
    fn has_pair(&self, title: &str, author: &str, except: Option<BookId>) -> bool {
        self.books
            .values()
            .any(|b| Some(b.id) != except && b.has_key(title, author))
    }
}

/// In-memory book store.
///
/// IDs are assigned from 1 and never reused. The uniqueness check and the
/// insert happen under the same write lock.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                books: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.store.read().await.books.len()
    }
}

#[async_trait]
impl BookRepository for InMemoryRepository {
    async fn get_books(&self, page: Page) -> Result<Vec<Book>> {
        let store = self.store.read().await;
        Ok(store
            .books
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_book(&self, id: BookId) -> Result<Book> {
        let store = self.store.read().await;
        store
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::book_not_found(id))
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let mut store = self.store.write().await;
        if store.has_pair(&book.title, &book.author, None) {
            return Err(RepositoryError::duplicate_book(&book.title, &book.author));
        }

        let id = store.next_id;
        store.next_id += 1;

        let stored = Book::from_new(id, book);
        store.books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<()> {
        let mut store = self.store.write().await;

        let mut updated = store
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::book_not_found(id))?;
        updated.apply(patch);

        if store.has_pair(&updated.title, &updated.author, Some(id)) {
            return Err(RepositoryError::duplicate_book(
                &updated.title,
                &updated.author,
            ));
        }

        store.books.insert(id, updated);
        Ok(())
    }

    async fn delete_book(&self, id: BookId) -> Result<()> {
        let mut store = self.store.write().await;
        store
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::book_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRepository::new();

        let book = repo
            .create_book(&NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        assert_eq!(book.id, 1);
        assert_eq!(repo.get_book(1).await.unwrap(), book);
    }

    #[tokio::test]
    async fn test_duplicate_rejected_and_count_stays_one() {
        let repo = InMemoryRepository::new();

        repo.create_book(&NewBook::new("T", "A", 1)).await.unwrap();
        let err = repo.create_book(&NewBook::new("T", "A", 2)).await.unwrap_err();

        assert_eq!(err, RepositoryError::duplicate_book("T", "A"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryRepository::new();

        let first = repo.create_book(&NewBook::new("A", "X", 1)).await.unwrap();
        repo.delete_book(first.id).await.unwrap();
        let second = repo.create_book(&NewBook::new("B", "X", 1)).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_books_window() {
        let repo = InMemoryRepository::new();
        for title in ["a", "b", "c"] {
            repo.create_book(&NewBook::new(title, "X", 1)).await.unwrap();
        }

        let page = repo.get_books(Page::new(1, 5)).await.unwrap();

        assert_eq!(
            page.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(),
            vec!["b", "c"]
        );
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let repo = InMemoryRepository::new();
        let book = repo
            .create_book(&NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        repo.update_book(book.id, &BookPatch::default().with_year(1966))
            .await
            .unwrap();

        assert_eq!(repo.get_book(book.id).await.unwrap().year, 1966);
    }

    #[tokio::test]
    async fn test_update_to_same_pair_is_not_duplicate() {
        let repo = InMemoryRepository::new();
        let book = repo
            .create_book(&NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        let patch = BookPatch::default().with_title("Dune").with_author("Herbert");
        assert!(repo.update_book(book.id, &patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_into_other_pair_is_duplicate() {
        let repo = InMemoryRepository::new();
        repo.create_book(&NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();
        let other = repo
            .create_book(&NewBook::new("Emma", "Herbert", 1815))
            .await
            .unwrap();

        let err = repo
            .update_book(other.id, &BookPatch::default().with_title("Dune"))
            .await
            .unwrap_err();

        assert!(err.is_duplicate_key());
        assert_eq!(repo.get_book(other.id).await.unwrap().title, "Emma");
    }

    #[tokio::test]
    async fn test_not_found_semantics() {
        let repo = InMemoryRepository::new();

        assert!(repo.get_book(999).await.unwrap_err().is_not_found());
        assert!(repo
            .update_book(999, &BookPatch::default().with_year(1))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_book(999).await.unwrap_err().is_not_found());
    }
}
