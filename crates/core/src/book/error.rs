use thiserror::Error;

/// Errors that can occur when validating book payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Book title cannot be empty")]
    EmptyTitle,
    #[error("Book title too long (max 255 characters)")]
    TitleTooLong,
    #[error("Book author cannot be empty")]
    EmptyAuthor,
    #[error("Book author too long (max 255 characters)")]
    AuthorTooLong,
    #[error("Invalid publication year: {0}")]
    InvalidYear(i32),
    #[error("Update must change at least one of title, author or year")]
    EmptyPatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_error_display() {
        assert_eq!(
            BookError::EmptyTitle.to_string(),
            "Book title cannot be empty"
        );
        assert_eq!(
            BookError::InvalidYear(-4).to_string(),
            "Invalid publication year: -4"
        );
        assert_eq!(
            BookError::EmptyPatch.to_string(),
            "Update must change at least one of title, author or year"
        );
    }
}
