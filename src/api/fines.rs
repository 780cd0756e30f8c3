use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, FineDto, MessageDto};
use crate::api::validation::validate_id;
use crate::services::FineError;
use crate::services::fine_service::UpdateFineRequest;

impl From<FineError> for ApiError {
    fn from(err: FineError) -> Self {
        match err {
            FineError::NotFound(id) => Self::not_found("Fine", id),
            FineError::AlreadyPaid => Self::validation(err.to_string()),
            FineError::Validation(msg) => Self::validation(msg),
            FineError::Database(msg) => Self::database(msg),
        }
    }
}

pub async fn list_fines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<FineDto>>>, ApiError> {
    let fines = state.fine_service().list().await?;
    Ok(Json(ApiResponse::success(fines)))
}

pub async fn get_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FineDto>>, ApiError> {
    let id = validate_id("fine", id)?;
    let fine = state.fine_service().get(id).await?;
    Ok(Json(ApiResponse::success(fine)))
}

pub async fn update_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFineRequest>,
) -> Result<Json<ApiResponse<FineDto>>, ApiError> {
    let id = validate_id("fine", id)?;
    let fine = state.fine_service().update(id, payload).await?;
    Ok(Json(ApiResponse::success(fine)))
}

/// `POST /api/fines/{id}/pay`
pub async fn pay_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FineDto>>, ApiError> {
    let id = validate_id("fine", id)?;
    let fine = state.fine_service().pay(id).await?;
    Ok(Json(ApiResponse::success(fine)))
}

/// `DELETE /api/fines/{id}/remove`
pub async fn remove_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let id = validate_id("fine", id)?;
    state.fine_service().remove(id).await?;
    Ok(Json(ApiResponse::success(MessageDto::new("Fine removed"))))
}

/// `DELETE /api/fines/{id}`, same effect as `remove` without a body.
pub async fn delete_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("fine", id)?;
    state.fine_service().remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
