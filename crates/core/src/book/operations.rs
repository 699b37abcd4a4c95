use super::error::BookError;
use super::types::{BookPatch, NewBook};

/// Maximum length of a title or author, in characters.
pub const MAX_FIELD_LEN: usize = 255;

/// Latest publication year accepted.
pub const MAX_YEAR: i32 = 9999;

/// Validates a book before creation.
pub fn validate_new_book(book: &NewBook) -> Result<(), BookError> {
    validate_title(&book.title)?;
    validate_author(&book.author)?;
    validate_year(book.year)
}

/// Validates a partial update. Only supplied fields are checked, and at
/// least one field must be supplied.
pub fn validate_patch(patch: &BookPatch) -> Result<(), BookError> {
    if patch.is_empty() {
        return Err(BookError::EmptyPatch);
    }
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(author) = &patch.author {
        validate_author(author)?;
    }
    if let Some(year) = patch.year {
        validate_year(year)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), BookError> {
    if title.trim().is_empty() {
        return Err(BookError::EmptyTitle);
    }
    if title.chars().count() > MAX_FIELD_LEN {
        return Err(BookError::TitleTooLong);
    }
    Ok(())
}

fn validate_author(author: &str) -> Result<(), BookError> {
    if author.trim().is_empty() {
        return Err(BookError::EmptyAuthor);
    }
    if author.chars().count() > MAX_FIELD_LEN {
        return Err(BookError::AuthorTooLong);
    }
    Ok(())
}

fn validate_year(year: i32) -> Result<(), BookError> {
    if !(1..=MAX_YEAR).contains(&year) {
        return Err(BookError::InvalidYear(year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_new_book() {
        let book = NewBook::new("Dune", "Herbert", 1965);
        assert_eq!(validate_new_book(&book), Ok(()));
    }

    #[test]
    fn test_blank_title_rejected() {
        let book = NewBook::new("   ", "Herbert", 1965);
        assert_eq!(validate_new_book(&book), Err(BookError::EmptyTitle));
    }

    #[test]
    fn test_blank_author_rejected() {
        let book = NewBook::new("Dune", "", 1965);
        assert_eq!(validate_new_book(&book), Err(BookError::EmptyAuthor));
    }

    #[test]
    fn test_long_fields_rejected() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);

        let book = NewBook::new(long.clone(), "Herbert", 1965);
        assert_eq!(validate_new_book(&book), Err(BookError::TitleTooLong));

        let book = NewBook::new("Dune", long, 1965);
        assert_eq!(validate_new_book(&book), Err(BookError::AuthorTooLong));
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(
            validate_new_book(&NewBook::new("A", "B", 0)),
            Err(BookError::InvalidYear(0))
        );
        assert_eq!(
            validate_new_book(&NewBook::new("A", "B", MAX_YEAR + 1)),
            Err(BookError::InvalidYear(MAX_YEAR + 1))
        );
        assert_eq!(validate_new_book(&NewBook::new("A", "B", 1)), Ok(()));
        assert_eq!(validate_new_book(&NewBook::new("A", "B", MAX_YEAR)), Ok(()));
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert_eq!(
            validate_patch(&BookPatch::default()),
            Err(BookError::EmptyPatch)
        );
    }

    #[test]
    fn test_patch_checks_only_supplied_fields() {
        let patch = BookPatch::default().with_year(1966);
        assert_eq!(validate_patch(&patch), Ok(()));

        let patch = BookPatch::default().with_title(" ");
        assert_eq!(validate_patch(&patch), Err(BookError::EmptyTitle));
    }
}
