pub mod books;
pub mod error;
pub mod health;

pub use error::AppError;
