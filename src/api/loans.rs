//! Loan endpoints.
//!
//! Renew and return are actions on an existing loan rather than plain edits,
//! so they get their own `POST` routes. Business rule violations come back as
//! `400` with the short message the service produced.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LoanDto};
use crate::api::validation::{validate_id, validate_isbn};
use crate::services::LoanError;
use crate::services::loan_service::{CreateLoanRequest, UpdateLoanRequest};

impl From<LoanError> for ApiError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::NotFound(id) => Self::not_found("Loan", id),
            LoanError::UserNotFound(id) => Self::not_found("User", id),
            LoanError::BookNotFound(isbn) => Self::not_found("Book", isbn),
            LoanError::Database(msg) => Self::database(msg),
            LoanError::UserBlocked
            | LoanError::BookUnavailable
            | LoanError::AlreadyRenewed
            | LoanError::NotActive
            | LoanError::AlreadyReturned => Self::validation(err.to_string()),
        }
    }
}

pub async fn list_loans(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LoanDto>>>, ApiError> {
    let loans = state.loan_service().list().await?;
    Ok(Json(ApiResponse::success(loans)))
}

/// `GET /api/loans/overdue`
pub async fn list_overdue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LoanDto>>>, ApiError> {
    let loans = state.loan_service().overdue().await?;
    Ok(Json(ApiResponse::success(loans)))
}

pub async fn get_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LoanDto>>, ApiError> {
    let id = validate_id("loan", id)?;
    let loan = state.loan_service().get(id).await?;
    Ok(Json(ApiResponse::success(loan)))
}

pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLoanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoanDto>>), ApiError> {
    validate_id("user", payload.user_id)?;
    validate_isbn(&payload.book_isbn)?;

    let loan = state.loan_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(loan))))
}

pub async fn update_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLoanRequest>,
) -> Result<Json<ApiResponse<LoanDto>>, ApiError> {
    let id = validate_id("loan", id)?;
    let loan = state.loan_service().update(id, payload).await?;
    Ok(Json(ApiResponse::success(loan)))
}

pub async fn delete_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("loan", id)?;
    state.loan_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/loans/{id}/renew`
pub async fn renew_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LoanDto>>, ApiError> {
    let id = validate_id("loan", id)?;
    let loan = state.loan_service().renew(id).await?;
    Ok(Json(ApiResponse::success(loan)))
}

/// `POST /api/loans/{id}/return`
pub async fn return_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LoanDto>>, ApiError> {
    let id = validate_id("loan", id)?;
    let loan = state.loan_service().return_loan(id).await?;
    Ok(Json(ApiResponse::success(loan)))
}
