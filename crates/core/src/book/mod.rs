mod error;
mod operations;
mod requests;
mod types;

pub use error::BookError;
pub use operations::{validate_new_book, validate_patch, MAX_FIELD_LEN, MAX_YEAR};
pub use requests::{CreateBookRequest, UpdateBookRequest};
pub use types::{Book, BookId, BookPatch, NewBook};
