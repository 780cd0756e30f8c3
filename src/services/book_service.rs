//! Domain service for the book catalogue.

use crate::api::types::BookDto;
use crate::domain::BookCategory;
use serde::Deserialize;
use thiserror::Error;

const fn default_total_stock() -> i32 {
    1
}

/// Payload to catalogue a book. `available_stock` defaults to `total_stock`.
#[derive(Debug, Deserialize, Clone)]
pub struct CreateBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
    #[serde(default)]
    pub category: BookCategory,
    #[serde(default = "default_total_stock")]
    pub total_stock: i32,
    pub available_stock: Option<i32>,
}

/// Payload to edit a book. Optional fields left out keep their stored value.
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateBookRequest {
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub year: i32,
    pub category: Option<BookCategory>,
    pub total_stock: i32,
    pub available_stock: Option<i32>,
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Book {0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A book with ISBN {0} already exists")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for BookError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Checks `0 <= available <= total`.
pub fn check_stock(total: i32, available: i32) -> Result<(), BookError> {
    if total < 0 {
        return Err(BookError::Validation(
            "total_stock cannot be negative".to_string(),
        ));
    }
    if available < 0 || available > total {
        return Err(BookError::Validation(format!(
            "available_stock must be between 0 and {total}"
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    /// Lists the catalogue by title, filtered by a case-insensitive match on
    /// title or author when `search` is non-empty.
    async fn list(&self, search: Option<&str>) -> Result<Vec<BookDto>, BookError>;

    async fn get(&self, isbn: &str) -> Result<BookDto, BookError>;

    async fn create(&self, request: CreateBookRequest) -> Result<BookDto, BookError>;

    async fn update(&self, isbn: &str, request: UpdateBookRequest) -> Result<BookDto, BookError>;

    /// Removes a book with its loans and their fines.
    async fn delete(&self, isbn: &str) -> Result<(), BookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stock_bounds() {
        assert!(check_stock(3, 0).is_ok());
        assert!(check_stock(3, 3).is_ok());
        assert!(check_stock(0, 0).is_ok());
        assert!(check_stock(3, 4).is_err());
        assert!(check_stock(3, -1).is_err());
        assert!(check_stock(-1, 0).is_err());
    }
}
