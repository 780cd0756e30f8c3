//! Domain service for library members.

use crate::api::types::UserDto;
use crate::domain::UserType;
use serde::Deserialize;
use thiserror::Error;

/// Payload to register a member.
#[derive(Debug, Deserialize, Clone)]
pub struct CreateUserRequest {
    pub national_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub user_type: UserType,
}

/// Payload to edit a member. Optional fields left out keep their stored value.
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateUserRequest {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: Option<UserType>,
    pub blocked: Option<bool>,
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A user with national ID {0} already exists")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Lists members ordered by name.
    async fn list(&self) -> Result<Vec<UserDto>, UserError>;

    async fn get(&self, id: i32) -> Result<UserDto, UserError>;

    /// Registers a member. New members are never blocked.
    async fn create(&self, request: CreateUserRequest) -> Result<UserDto, UserError>;

    async fn update(&self, id: i32, request: UpdateUserRequest) -> Result<UserDto, UserError>;

    /// Removes a member with their loans and fines.
    async fn delete(&self, id: i32) -> Result<(), UserError>;
}
