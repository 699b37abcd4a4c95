//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use bookshelf_core::book::{Book, BookId, BookPatch, NewBook};
use bookshelf_core::storage::{BookRepository, Page, RepositoryError, Result};

use super::conversions::row_to_book;
use super::error::{
    map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id, map_tokio_rusqlite_error_with_key,
};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-backed book store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database file at `path` and ensures the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path, "Opened SQLite database");
        Ok(Self { conn })
    }

    /// Creates a repository over an in-memory database. Data is lost when
    /// the repository is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// DuplicateKey naming the (title, author) pair an update tried to
    /// write. Fields the patch leaves out come from the current row.
    async fn conflicting_pair(&self, id: BookId, patch: &BookPatch) -> RepositoryError {
        let current = self.get_book(id).await.ok();
        let title = patch
            .title
            .as_deref()
            .or(current.as_ref().map(|b| b.title.as_str()))
            .unwrap_or_default();
        let author = patch
            .author
            .as_deref()
            .or(current.as_ref().map(|b| b.author.as_str()))
            .unwrap_or_default();
        RepositoryError::duplicate_book(title, author)
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl BookRepository for SqliteRepository {
    async fn get_books(&self, page: Page) -> Result<Vec<Book>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_BOOKS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![page.limit, page.offset], row_to_book)
                    .map_err(wrap_err)?;

                let mut books = Vec::new();
                for row_result in rows {
                    books.push(row_result.map_err(wrap_err)?);
                }
                Ok(books)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn get_book(&self, id: BookId) -> Result<Book> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_BOOK_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_book).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let new_book = book.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_BOOK,
                    rusqlite::params![new_book.title, new_book.author, new_book.year],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_key(e, &book.title, &book.author))?;

        Ok(Book::from_new(id, book))
    }

    async fn update_book(&self, id: BookId, patch: &BookPatch) -> Result<()> {
        let title = patch.title.clone();
        let author = patch.author.clone();
        let year = patch.year;

        let result = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_BOOK,
                        rusqlite::params![id, title, author, year],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await;

        match result.map_err(|e| map_tokio_rusqlite_error_with_id(e, id)) {
            Err(err) if err.is_duplicate_key() => Err(self.conflicting_pair(id, patch).await),
            other => other,
        }
    }

    async fn delete_book(&self, id: BookId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_BOOK, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }
}
