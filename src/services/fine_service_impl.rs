//! `SeaORM` implementation of the `FineService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::api::types::FineDto;
use crate::db::Store;
use crate::entities::fines;
use crate::services::fine_service::{FineError, FineService, UpdateFineRequest};

pub struct SeaOrmFineService {
    store: Store,
}

impl SeaOrmFineService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn find(&self, id: i32) -> Result<fines::Model, FineError> {
        self.store
            .get_fine(id)
            .await?
            .ok_or(FineError::NotFound(id))
    }
}

#[async_trait]
impl FineService for SeaOrmFineService {
    async fn list(&self) -> Result<Vec<FineDto>, FineError> {
        let fines = self.store.list_fines().await?;
        Ok(fines.into_iter().map(FineDto::from).collect())
    }

    async fn get(&self, id: i32) -> Result<FineDto, FineError> {
        Ok(self.find(id).await?.into())
    }

    async fn pay(&self, id: i32) -> Result<FineDto, FineError> {
        let fine = self.find(id).await?;
        if fine.paid {
            return Err(FineError::AlreadyPaid);
        }

        let debtor_id = self
            .store
            .fine_debtor_id(&fine)
            .await?
            .ok_or_else(|| FineError::Database(format!("Fine {id} has no loan")))?;

        let (fine, released) = self
            .store
            .settle_fine(fine, debtor_id, chrono::Utc::now())
            .await?;

        metrics::counter!("fines_paid_total").increment(1);
        if released {
            info!("User {} has settled all fines", debtor_id);
        }

        Ok(fine.into())
    }

    async fn update(&self, id: i32, request: UpdateFineRequest) -> Result<FineDto, FineError> {
        let fine = self.find(id).await?;

        let overdue_days = request.overdue_days.unwrap_or(fine.overdue_days);
        let daily_rate = request.daily_rate.unwrap_or(fine.daily_rate);
        if overdue_days < 0 || daily_rate < 0 {
            return Err(FineError::Validation(
                "overdue_days and daily_rate cannot be negative".to_string(),
            ));
        }

        let fine = self
            .store
            .adjust_fine(fine, overdue_days, daily_rate)
            .await?;
        Ok(fine.into())
    }

    async fn remove(&self, id: i32) -> Result<(), FineError> {
        let fine = self.find(id).await?;
        let debtor_id = self.store.fine_debtor_id(&fine).await?;
        self.store.remove_fine(fine.id, debtor_id).await?;
        Ok(())
    }
}
