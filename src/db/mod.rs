use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    Set, Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::LoanState;
use crate::entities::{books, fines, loans, prelude::*, users};

pub mod migrator;
pub mod repositories;

pub use repositories::book::BookFields;
pub use repositories::loan::{LateCharge, LoanRecord};
pub use repositories::user::{NewUser, UserUpdate};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn book_repo(&self) -> repositories::book::BookRepository {
        repositories::book::BookRepository::new(self.conn.clone())
    }

    fn loan_repo(&self) -> repositories::loan::LoanRepository {
        repositories::loan::LoanRepository::new(self.conn.clone())
    }

    fn fine_repo(&self) -> repositories::fine::FineRepository {
        repositories::fine::FineRepository::new(self.conn.clone())
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get(id).await
    }

    pub async fn get_user_by_national_id(&self, national_id: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_national_id(national_id).await
    }

    pub async fn create_user(&self, user: NewUser) -> Result<users::Model> {
        self.user_repo().create(user).await
    }

    pub async fn update_user(&self, id: i32, update: UserUpdate) -> Result<Option<users::Model>> {
        self.user_repo().update(id, update).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    // Books

    pub async fn list_books(&self, search: Option<&str>) -> Result<Vec<books::Model>> {
        self.book_repo().list(search).await
    }

    pub async fn get_book(&self, isbn: &str) -> Result<Option<books::Model>> {
        self.book_repo().get(isbn).await
    }

    pub async fn create_book(&self, isbn: String, fields: BookFields) -> Result<books::Model> {
        self.book_repo().create(isbn, fields).await
    }

    pub async fn update_book(&self, isbn: &str, fields: BookFields) -> Result<Option<books::Model>> {
        self.book_repo().update(isbn, fields).await
    }

    pub async fn delete_book(&self, isbn: &str) -> Result<bool> {
        self.book_repo().delete(isbn).await
    }

    // Loans

    pub async fn list_loans(&self) -> Result<Vec<LoanRecord>> {
        self.loan_repo().list().await
    }

    pub async fn get_loan(&self, id: i32) -> Result<Option<loans::Model>> {
        self.loan_repo().get(id).await
    }

    pub async fn get_loan_record(&self, id: i32) -> Result<Option<LoanRecord>> {
        self.loan_repo().get_record(id).await
    }

    pub async fn open_loan(
        &self,
        user_id: i32,
        isbn: &str,
        loaned_at: DateTime<Utc>,
        expected_return_date: NaiveDate,
    ) -> Result<Option<loans::Model>> {
        self.loan_repo()
            .open(user_id, isbn, loaned_at, expected_return_date)
            .await
    }

    pub async fn renew_loan(&self, loan: loans::Model, new_due: NaiveDate) -> Result<loans::Model> {
        self.loan_repo().renew(loan, new_due).await
    }

    pub async fn close_loan(
        &self,
        loan: loans::Model,
        returned_on: NaiveDate,
        charge: Option<LateCharge>,
    ) -> Result<(loans::Model, Option<fines::Model>)> {
        self.loan_repo().close(loan, returned_on, charge).await
    }

    pub async fn update_loan_due_date(
        &self,
        id: i32,
        expected_return_date: NaiveDate,
    ) -> Result<Option<loans::Model>> {
        self.loan_repo()
            .update_due_date(id, expected_return_date)
            .await
    }

    pub async fn delete_loan(&self, id: i32) -> Result<bool> {
        self.loan_repo().delete(id).await
    }

    pub async fn list_overdue_loans(&self, today: NaiveDate) -> Result<Vec<LoanRecord>> {
        self.loan_repo().list_overdue(today).await
    }

    /// Overwrites a loan's state. Only the demo seeder needs this.
    pub async fn set_loan_state(&self, id: i32, state: LoanState) -> Result<()> {
        loans::ActiveModel {
            id: Set(id),
            state: Set(state),
            ..Default::default()
        }
        .update(&self.conn)
        .await?;
        Ok(())
    }

    // Fines

    pub async fn list_fines(&self) -> Result<Vec<fines::Model>> {
        self.fine_repo().list().await
    }

    pub async fn get_fine(&self, id: i32) -> Result<Option<fines::Model>> {
        self.fine_repo().get(id).await
    }

    pub async fn fine_debtor_id(&self, fine: &fines::Model) -> Result<Option<i32>> {
        self.fine_repo().debtor_id(fine).await
    }

    pub async fn settle_fine(
        &self,
        fine: fines::Model,
        debtor_id: i32,
        paid_at: DateTime<Utc>,
    ) -> Result<(fines::Model, bool)> {
        self.fine_repo().settle(fine, debtor_id, paid_at).await
    }

    pub async fn adjust_fine(
        &self,
        fine: fines::Model,
        overdue_days: i32,
        daily_rate: i32,
    ) -> Result<fines::Model> {
        self.fine_repo()
            .adjust(fine, overdue_days, daily_rate)
            .await
    }

    pub async fn remove_fine(&self, id: i32, debtor_id: Option<i32>) -> Result<bool> {
        self.fine_repo().remove(id, debtor_id).await
    }

    /// Deletes every row in dependency order.
    pub async fn wipe(&self) -> Result<()> {
        let txn = self.conn.begin().await?;
        Fines::delete_many().exec(&txn).await?;
        Loans::delete_many().exec(&txn).await?;
        Books::delete_many().exec(&txn).await?;
        Users::delete_many().exec(&txn).await?;
        txn.commit().await?;
        info!("All library data wiped");
        Ok(())
    }
}
