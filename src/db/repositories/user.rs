use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::restock;
use crate::domain::{LoanState, UserType};
use crate::entities::{fines, loans, prelude::*, users};

/// Fields needed to register a member.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
}

/// Full replacement of a member's editable fields.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub blocked: bool,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        Users::find()
            .order_by_asc(users::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn get(&self, id: i32) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn get_by_national_id(&self, national_id: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::NationalId.eq(national_id))
            .one(&self.conn)
            .await
            .context("Failed to query user by national ID")
    }

    pub async fn create(&self, user: NewUser) -> Result<users::Model> {
        let model = users::ActiveModel {
            national_id: Set(user.national_id),
            name: Set(user.name),
            email: Set(user.email),
            phone: Set(user.phone),
            user_type: Set(user.user_type),
            blocked: Set(false),
            registered_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        info!("Registered user {} ({})", model.name, model.national_id);
        Ok(model)
    }

    pub async fn update(&self, id: i32, update: UserUpdate) -> Result<Option<users::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = existing.into();
        active.national_id = Set(update.national_id);
        active.name = Set(update.name);
        active.email = Set(update.email);
        active.phone = Set(update.phone);
        active.user_type = Set(update.user_type);
        active.blocked = Set(update.blocked);

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;
        Ok(Some(model))
    }

    /// Removes a member together with their loans and fines.
    ///
    /// Copies still out on those loans go back on the shelf.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let user_loans = Loans::find()
            .filter(loans::Column::UserId.eq(id))
            .all(&txn)
            .await?;

        for loan in user_loans.iter().filter(|l| l.state != LoanState::Returned) {
            restock(&txn, &loan.book_isbn).await?;
        }

        let loan_ids: Vec<i32> = user_loans.iter().map(|l| l.id).collect();
        if !loan_ids.is_empty() {
            Fines::delete_many()
                .filter(fines::Column::LoanId.is_in(loan_ids.clone()))
                .exec(&txn)
                .await?;
            Loans::delete_many()
                .filter(loans::Column::Id.is_in(loan_ids))
                .exec(&txn)
                .await?;
        }

        let result = Users::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed user with ID: {}", id);
        }
        Ok(removed)
    }
}
