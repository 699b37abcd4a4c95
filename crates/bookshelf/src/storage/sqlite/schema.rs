//! SQLite schema and SQL query constants.

/// Creates the books table. `UNIQUE(title, author)` makes duplicate
/// detection atomic with the insert.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL,
    UNIQUE (title, author)
);
"#;

pub const SELECT_BOOKS_PAGE: &str = r#"
SELECT id, title, author, year
FROM books
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_BOOK_BY_ID: &str = r#"
SELECT id, title, author, year
FROM books
WHERE id = ?1
"#;

pub const INSERT_BOOK: &str = r#"
INSERT INTO books (title, author, year)
VALUES (?1, ?2, ?3)
"#;

/// Partial update: NULL parameters keep the stored value.
pub const UPDATE_BOOK: &str = r#"
UPDATE books
SET title = COALESCE(?2, title),
    author = COALESCE(?3, author),
    year = COALESCE(?4, year)
WHERE id = ?1
"#;

pub const DELETE_BOOK: &str = r#"
DELETE FROM books
WHERE id = ?1
"#;
