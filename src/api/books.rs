use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, BookDto};
use crate::api::validation::{
    validate_isbn, validate_required, validate_search_query, validate_year,
};
use crate::services::BookError;
use crate::services::book_service::{CreateBookRequest, UpdateBookRequest};

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    pub search: Option<String>,
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(isbn) => Self::not_found("Book", isbn),
            BookError::Validation(msg) => Self::validation(msg),
            BookError::Conflict(_) => Self::conflict(err.to_string()),
            BookError::Database(msg) => Self::database(msg),
        }
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    publisher: Option<&str>,
    year: i32,
) -> Result<(), ApiError> {
    validate_required("title", title, 200)?;
    validate_required("author", author, 100)?;
    if let Some(publisher) = publisher {
        validate_required("publisher", publisher, 100)?;
    }
    validate_year(year)?;
    Ok(())
}

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookQuery>,
) -> Result<Json<ApiResponse<Vec<BookDto>>>, ApiError> {
    let search = validate_search_query(query.search.as_deref())?;
    let books = state.book_service().list(search).await?;
    Ok(Json(ApiResponse::success(books)))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<ApiResponse<BookDto>>, ApiError> {
    let isbn = validate_isbn(&isbn)?;
    let book = state.book_service().get(isbn).await?;
    Ok(Json(ApiResponse::success(book)))
}

pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookDto>>), ApiError> {
    validate_isbn(&payload.isbn)?;
    validate_fields(
        &payload.title,
        &payload.author,
        Some(&payload.publisher),
        payload.year,
    )?;

    let book = state.book_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(book))))
}

pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<ApiResponse<BookDto>>, ApiError> {
    let isbn = validate_isbn(&isbn)?;
    validate_fields(
        &payload.title,
        &payload.author,
        payload.publisher.as_deref(),
        payload.year,
    )?;

    let book = state.book_service().update(isbn, payload).await?;
    Ok(Json(ApiResponse::success(book)))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    let isbn = validate_isbn(&isbn)?;
    state.book_service().delete(isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
