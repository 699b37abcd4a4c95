//! API request types for book operations.
//!
//! Pure data types with no I/O. Conversion into domain types validates the
//! payload, so a successfully converted value is always storable.

use serde::{Deserialize, Serialize};

use super::error::BookError;
use super::operations::{validate_new_book, validate_patch};
use super::types::{BookPatch, NewBook};
use crate::serde::{deserialize_optional_string, deserialize_optional_year};

/// Request payload for creating a new book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl CreateBookRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Validates the request and converts it into a [`NewBook`].
    ///
    /// Surrounding whitespace is trimmed from title and author.
    pub fn into_new_book(self) -> Result<NewBook, BookError> {
        let book = NewBook::new(self.title.trim(), self.author.trim(), self.year);
        validate_new_book(&book)?;
        Ok(book)
    }
}

/// Request payload for updating a book.
///
/// Empty strings and a zero year count as "not supplied", so a client may
/// send a full form and only the filled-in fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
}

impl UpdateBookRequest {
    /// Validates the request and converts it into a [`BookPatch`].
    pub fn into_patch(self) -> Result<BookPatch, BookError> {
        let patch = BookPatch {
            title: self.title.map(|t| t.trim().to_string()),
            author: self.author.map(|a| a.trim().to_string()),
            year: self.year,
        };
        validate_patch(&patch)?;
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_trims_and_validates() {
        let request = CreateBookRequest::new("  Dune ", " Herbert", 1965);
        let book = request.into_new_book().unwrap();

        assert_eq!(book, NewBook::new("Dune", "Herbert", 1965));
    }

    #[test]
    fn test_create_request_rejects_blank_author() {
        let request = CreateBookRequest::new("Dune", "  ", 1965);
        assert_eq!(request.into_new_book(), Err(BookError::EmptyAuthor));
    }

    #[test]
    fn test_create_request_requires_all_fields() {
        let result: Result<CreateBookRequest, _> =
            serde_json::from_str(r#"{"title": "Dune", "author": "Herbert"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_skips_empty_values() {
        let request: UpdateBookRequest =
            serde_json::from_str(r#"{"title": "", "author": "Frank Herbert", "year": 0}"#)
                .unwrap();

        assert!(request.title.is_none());
        assert!(request.year.is_none());

        let patch = request.into_patch().unwrap();
        assert_eq!(patch, BookPatch::default().with_author("Frank Herbert"));
    }

    #[test]
    fn test_update_request_with_nothing_is_rejected() {
        let request: UpdateBookRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.into_patch(), Err(BookError::EmptyPatch));
    }

    #[test]
    fn test_update_request_validates_year() {
        let request: UpdateBookRequest = serde_json::from_str(r#"{"year": -12}"#).unwrap();
        assert_eq!(request.into_patch(), Err(BookError::InvalidYear(-12)));
    }
}
