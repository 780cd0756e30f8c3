//! Domain service for the loan lifecycle.
//!
//! A loan is opened against an unblocked member and an available copy, may be
//! renewed once while active, and is closed by a return. Late returns raise a
//! fine and block the member until every fine they hold is settled.

use crate::api::types::LoanDto;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct CreateLoanRequest {
    #[serde(alias = "user")]
    pub user_id: i32,
    #[serde(alias = "book")]
    pub book_isbn: String,
    /// Overrides the due date derived from the member's type.
    pub expected_return_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpdateLoanRequest {
    pub expected_return_date: NaiveDate,
}

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Loan {0} not found")]
    NotFound(i32),

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Book {0} not found")]
    BookNotFound(String),

    #[error("user is blocked")]
    UserBlocked,

    #[error("book is not available")]
    BookUnavailable,

    #[error("already renewed")]
    AlreadyRenewed,

    #[error("not active")]
    NotActive,

    #[error("already returned")]
    AlreadyReturned,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for LoanError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LoanError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait LoanService: Send + Sync {
    /// All loans, newest first.
    async fn list(&self) -> Result<Vec<LoanDto>, LoanError>;

    async fn get(&self, id: i32) -> Result<LoanDto, LoanError>;

    /// Lends a copy, taking it off the shelf.
    async fn create(&self, request: CreateLoanRequest) -> Result<LoanDto, LoanError>;

    /// Extends an active loan by the member's loan duration. Allowed once.
    async fn renew(&self, id: i32) -> Result<LoanDto, LoanError>;

    /// Closes a loan today, shelving the copy and charging a fine when late.
    async fn return_loan(&self, id: i32) -> Result<LoanDto, LoanError>;

    /// Corrects the due date.
    async fn update(&self, id: i32, request: UpdateLoanRequest) -> Result<LoanDto, LoanError>;

    async fn delete(&self, id: i32) -> Result<(), LoanError>;

    /// Active loans already past their due date, most overdue first.
    async fn overdue(&self) -> Result<Vec<LoanDto>, LoanError>;
}
