//! SQLite row conversion functions.

use rusqlite::Row;

use bookshelf_core::book::Book;

/// Converts a SQLite row to a Book.
///
/// Expected columns: id, title, author, year
pub fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
    })
}
