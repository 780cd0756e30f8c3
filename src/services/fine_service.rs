//! Domain service for fines raised by late returns.

use crate::api::types::FineDto;
use serde::Deserialize;
use thiserror::Error;

/// Adjusts a fine's charge. Omitted fields keep their value.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdateFineRequest {
    pub overdue_days: Option<i32>,
    pub daily_rate: Option<i32>,
}

#[derive(Debug, Error)]
pub enum FineError {
    #[error("Fine {0} not found")]
    NotFound(i32),

    #[error("already paid")]
    AlreadyPaid,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for FineError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FineError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait FineService: Send + Sync {
    /// All fines, most recent first.
    async fn list(&self) -> Result<Vec<FineDto>, FineError>;

    async fn get(&self, id: i32) -> Result<FineDto, FineError>;

    /// Settles a fine. The debtor is unblocked once nothing else is owed.
    async fn pay(&self, id: i32) -> Result<FineDto, FineError>;

    async fn update(&self, id: i32, request: UpdateFineRequest) -> Result<FineDto, FineError>;

    /// Drops a fine without payment, then re-evaluates the debtor's block.
    async fn remove(&self, id: i32) -> Result<(), FineError>;
}
