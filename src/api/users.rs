use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::api::validation::{validate_email, validate_id, validate_max_len, validate_required};
use crate::services::UserError;
use crate::services::user_service::{CreateUserRequest, UpdateUserRequest};

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => Self::not_found("User", id),
            UserError::Validation(msg) => Self::validation(msg),
            UserError::Conflict(_) => Self::conflict(err.to_string()),
            UserError::Database(msg) => Self::database(msg),
        }
    }
}

fn validate_fields(national_id: &str, name: &str, email: &str, phone: &str) -> Result<(), ApiError> {
    validate_required("national_id", national_id, 12)?;
    validate_required("name", name, 100)?;
    validate_email(email)?;
    validate_max_len("phone", phone, 15)
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.user_service().list().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id("user", id)?;
    let user = state.user_service().get(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    validate_fields(
        &payload.national_id,
        &payload.name,
        &payload.email,
        &payload.phone,
    )?;

    let user = state.user_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id("user", id)?;
    validate_fields(
        &payload.national_id,
        &payload.name,
        &payload.email,
        payload.phone.as_deref().unwrap_or_default(),
    )?;

    let user = state.user_service().update(id, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("user", id)?;
    state.user_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
