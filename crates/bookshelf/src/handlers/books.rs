//! Book CRUD handlers.
//!
//! Handlers only translate HTTP to service calls. Caching and event
//! publication happen behind `BookService`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use bookshelf_core::book::{Book, BookId, CreateBookRequest, UpdateBookRequest};
use bookshelf_core::storage::Page;

use crate::{handlers::AppError, state::AppState};

/// Query parameters for listing books.
///
/// Kept as raw strings so that garbage values fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl ListBooksQuery {
    fn page(&self) -> Page {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());
        Page::from_query(parse(&self.offset), parse(&self.limit))
    }
}

fn book_id(path: Result<Path<BookId>, PathRejection>) -> Result<BookId, AppError> {
    path.map(|Path(id)| id).map_err(|e| {
        tracing::warn!(error = %e, "Invalid book id");
        AppError::bad_request("invalid book id")
    })
}

/// GET /api/v1/helloworld
pub async fn helloworld() -> Json<&'static str> {
    Json("helloworld")
}

/// GET /api/v1/books
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.books.get_books(query.page()).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let id = book_id(path)?;
    let book = state.books.get_book(id).await?;
    Ok(Json(book))
}

/// POST /api/v1/books
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::bad_request(format!("invalid request body: {}", e.body_text())))?;
    let new_book = request.into_new_book()?;

    let book = state.books.create_book(&new_book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/v1/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = book_id(path)?;
    let Json(request) =
        payload.map_err(|e| AppError::bad_request(format!("invalid request body: {}", e.body_text())))?;
    let patch = request.into_patch()?;

    state.books.update_book(id, &patch).await?;
    Ok(Json(json!({ "message": "book updated successfully" })))
}

/// DELETE /api/v1/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = book_id(path)?;
    state.books.delete_book(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(offset: Option<&str>, limit: Option<&str>) -> ListBooksQuery {
        ListBooksQuery {
            offset: offset.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(ListBooksQuery::default().page(), Page::new(0, 10));
    }

    #[test]
    fn test_page_garbage_falls_back() {
        assert_eq!(query(Some("abc"), Some("-5")).page(), Page::new(0, 10));
        assert_eq!(query(Some("-1"), Some("0")).page(), Page::new(0, 10));
    }

    #[test]
    fn test_page_caps_limit() {
        assert_eq!(query(Some("20"), Some("1000")).page(), Page::new(20, 100));
        assert_eq!(query(Some(" 3 "), Some("7")).page(), Page::new(3, 7));
    }
}
