use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// A book record as owned by the persistent store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl Book {
    /// Creates a book with an already-assigned ID.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Builds the stored representation of a new book once the store has
    /// assigned its ID.
    pub fn from_new(id: BookId, new_book: &NewBook) -> Self {
        Self {
            id,
            title: new_book.title.clone(),
            author: new_book.author.clone(),
            year: new_book.year,
        }
    }

    /// Applies the supplied fields of a patch in place.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }

    /// Returns true if this book has the given (title, author) pair.
    pub fn has_key(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }
}

/// A book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Partial update of a book. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl BookPatch {
    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the publication year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Returns true if no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_patch_keeps_missing_fields() {
        let mut book = Book::new(1, "Dune", "Herbert", 1965);

        book.apply(&BookPatch::default().with_year(1966));

        assert_eq!(book, Book::new(1, "Dune", "Herbert", 1966));
    }

    #[test]
    fn test_apply_full_patch() {
        let mut book = Book::new(7, "Dune", "Herbert", 1965);
        let patch = BookPatch::default()
            .with_title("Dune Messiah")
            .with_author("Frank Herbert")
            .with_year(1969);

        book.apply(&patch);

        assert_eq!(book.id, 7);
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, 1969);
    }

    #[test]
    fn test_from_new_copies_fields() {
        let new_book = NewBook::new("Emma", "Austen", 1815);
        let book = Book::from_new(3, &new_book);

        assert_eq!(book, Book::new(3, "Emma", "Austen", 1815));
        assert!(book.has_key("Emma", "Austen"));
        assert!(!book.has_key("Emma", "Bronte"));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(BookPatch::default().is_empty());
        assert!(!BookPatch::default().with_author("Le Guin").is_empty());
    }

    #[test]
    fn test_book_json_shape() {
        let book = Book::new(1, "Dune", "Herbert", 1965);
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Dune", "author": "Herbert", "year": 1965})
        );
    }
}
