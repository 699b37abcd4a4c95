//! Book service: repository operations plus change-event publication.

use std::sync::Arc;

use bookshelf_core::book::{Book, BookId, BookPatch, NewBook};
use bookshelf_core::events::{BookEvent, EventPublisher};
use bookshelf_core::storage::{BookRepository, Page, Result};

/// Orchestrates the (cached) repository and the event publisher.
///
/// Every successful mutation publishes exactly one event after the
/// repository confirms it. Publishing is fire-and-forget: a failure is
/// logged and never fails or rolls back the mutation.
#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    publisher: Arc<dyn EventPublisher>,
    topic: String,
}

impl BookService {
    pub fn new(
        repository: Arc<dyn BookRepository>,
        publisher: Arc<dyn EventPublisher>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            publisher,
            topic: topic.into(),
        }
    }

    /// Topic events are published to.
    #[cfg(test)]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub async fn get_books(&self, page: Page) -> Result<Vec<Book>> {
        self.repository.get_books(page).await
    }

    pub async fn get_book(&self, id: BookId) -> Result<Book> {
        self.repository.get_book(id).await
    }

    pub async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let created = self.repository.create_book(book).await?;
        self.notify(BookEvent::created(&created)).await;
        tracing::info!(book_id = created.id, title = %created.title, author = %created.author, "Created book");
        Ok(created)
    }

    pub async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<()> {
        self.repository.update_book(id, patch).await?;
        self.notify(BookEvent::updated(id, patch)).await;
        tracing::info!(book_id = id, "Updated book");
        Ok(())
    }

    pub async fn delete_book(&self, id: BookId) -> Result<()> {
        self.repository.delete_book(id).await?;
        self.notify(BookEvent::deleted(id)).await;
        tracing::info!(book_id = id, "Deleted book");
        Ok(())
    }

    async fn notify(&self, event: BookEvent) {
        if let Err(err) = self.publisher.publish(&self.topic, &event).await {
            tracing::warn!(
                topic = %self.topic,
                event = event.kind(),
                book_id = event.book_id(),
                error = %err,
                "Failed to publish book event"
            );
        }
    }
}
