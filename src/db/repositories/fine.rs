use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::release_user_if_settled;
use crate::entities::{fines, prelude::*};

pub struct FineRepository {
    conn: DatabaseConnection,
}

impl FineRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All fines, most recent first.
    pub async fn list(&self) -> Result<Vec<fines::Model>> {
        Fines::find()
            .order_by_desc(fines::Column::GeneratedAt)
            .order_by_desc(fines::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list fines")
    }

    pub async fn get(&self, id: i32) -> Result<Option<fines::Model>> {
        Fines::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query fine by ID")
    }

    /// The member who owes `fine`, through its loan.
    pub async fn debtor_id(&self, fine: &fines::Model) -> Result<Option<i32>> {
        let loan = Loans::find_by_id(fine.loan_id)
            .one(&self.conn)
            .await
            .context("Failed to query loan for fine")?;
        Ok(loan.map(|l| l.user_id))
    }

    /// Settles a fine and unblocks its debtor when nothing else is owed.
    ///
    /// Returns the updated fine and whether the debtor was unblocked.
    pub async fn settle(
        &self,
        fine: fines::Model,
        debtor_id: i32,
        paid_at: DateTime<Utc>,
    ) -> Result<(fines::Model, bool)> {
        let txn = self.conn.begin().await?;

        let mut active: fines::ActiveModel = fine.into();
        active.paid = Set(true);
        active.paid_at = Set(Some(paid_at));
        let fine = active.update(&txn).await.context("Failed to pay fine")?;

        let released = release_user_if_settled(&txn, debtor_id).await?;

        txn.commit().await?;
        info!("Fine {} paid ({} total)", fine.id, fine.total_amount);
        Ok((fine, released))
    }

    /// Rewrites the charge parameters; the total follows through the save hook.
    pub async fn adjust(
        &self,
        fine: fines::Model,
        overdue_days: i32,
        daily_rate: i32,
    ) -> Result<fines::Model> {
        let mut active: fines::ActiveModel = fine.into();
        active.overdue_days = Set(overdue_days);
        active.daily_rate = Set(daily_rate);
        active
            .update(&self.conn)
            .await
            .context("Failed to update fine")
    }

    /// Drops a fine without payment and re-evaluates the debtor's block.
    ///
    /// Returns whether the debtor was unblocked.
    pub async fn remove(&self, id: i32, debtor_id: Option<i32>) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Fines::delete_by_id(id).exec(&txn).await?;

        let released = match debtor_id {
            Some(user_id) => release_user_if_settled(&txn, user_id).await?,
            None => false,
        };

        txn.commit().await?;
        info!("Removed fine with ID: {}", id);
        Ok(released)
    }
}
