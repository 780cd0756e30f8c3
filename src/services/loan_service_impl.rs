//! `SeaORM` implementation of the `LoanService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::types::LoanDto;
use crate::config::Config;
use crate::db::{LateCharge, LoanRecord, Store};
use crate::domain::{self, LoanState};
use crate::services::loan_service::{
    CreateLoanRequest, LoanError, LoanService, UpdateLoanRequest,
};

pub struct SeaOrmLoanService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmLoanService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn record(&self, id: i32) -> Result<LoanDto, LoanError> {
        let record = self
            .store
            .get_loan_record(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;
        Ok(Self::to_dto(record))
    }

    fn to_dto(record: LoanRecord) -> LoanDto {
        LoanDto::from_record(record, domain::today())
    }
}

#[async_trait]
impl LoanService for SeaOrmLoanService {
    async fn list(&self) -> Result<Vec<LoanDto>, LoanError> {
        let records = self.store.list_loans().await?;
        Ok(records.into_iter().map(Self::to_dto).collect())
    }

    async fn get(&self, id: i32) -> Result<LoanDto, LoanError> {
        self.record(id).await
    }

    async fn create(&self, request: CreateLoanRequest) -> Result<LoanDto, LoanError> {
        let user = self
            .store
            .get_user(request.user_id)
            .await?
            .ok_or(LoanError::UserNotFound(request.user_id))?;

        let isbn = request.book_isbn.trim();
        let book = self
            .store
            .get_book(isbn)
            .await?
            .ok_or_else(|| LoanError::BookNotFound(isbn.to_string()))?;

        if user.blocked {
            return Err(LoanError::UserBlocked);
        }
        if !book.is_available() {
            return Err(LoanError::BookUnavailable);
        }

        let expected = request
            .expected_return_date
            .unwrap_or_else(|| domain::expected_return_date(domain::today(), user.user_type));

        // The copy can still vanish between the read above and the decrement.
        let loan = self
            .store
            .open_loan(user.id, &book.isbn, chrono::Utc::now(), expected)
            .await?
            .ok_or(LoanError::BookUnavailable)?;

        metrics::counter!("loans_created_total").increment(1);
        self.record(loan.id).await
    }

    async fn renew(&self, id: i32) -> Result<LoanDto, LoanError> {
        let loan = self
            .store
            .get_loan(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;

        if loan.renewed {
            return Err(LoanError::AlreadyRenewed);
        }
        if loan.state != LoanState::Active {
            return Err(LoanError::NotActive);
        }

        let user = self
            .store
            .get_user(loan.user_id)
            .await?
            .ok_or(LoanError::UserNotFound(loan.user_id))?;

        let new_due = domain::expected_return_date(loan.expected_return_date, user.user_type);
        let loan = self.store.renew_loan(loan, new_due).await?;

        info!("Loan {} renewed until {}", loan.id, new_due);
        self.record(loan.id).await
    }

    async fn return_loan(&self, id: i32) -> Result<LoanDto, LoanError> {
        let loan = self
            .store
            .get_loan(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;

        if loan.state == LoanState::Returned {
            return Err(LoanError::AlreadyReturned);
        }

        let today = domain::today();
        let daily_rate = self.config.read().await.circulation.daily_fine_rate;
        let charge =
            domain::days_late(loan.expected_return_date, today).map(|days| LateCharge {
                overdue_days: i32::try_from(days).unwrap_or(i32::MAX),
                daily_rate,
            });

        let (loan, fine) = self.store.close_loan(loan, today, charge).await?;

        metrics::counter!("loans_returned_total").increment(1);
        match &fine {
            Some(fine) => {
                metrics::counter!("fines_generated_total").increment(1);
                info!(
                    "Loan {} returned {} days late; fine {} of {} raised, user {} blocked",
                    loan.id, fine.overdue_days, fine.id, fine.total_amount, loan.user_id
                );
            }
            None => info!("Loan {} returned on time", loan.id),
        }

        self.record(loan.id).await
    }

    async fn update(&self, id: i32, request: UpdateLoanRequest) -> Result<LoanDto, LoanError> {
        let loan = self
            .store
            .update_loan_due_date(id, request.expected_return_date)
            .await?
            .ok_or(LoanError::NotFound(id))?;
        self.record(loan.id).await
    }

    async fn delete(&self, id: i32) -> Result<(), LoanError> {
        if self.store.delete_loan(id).await? {
            Ok(())
        } else {
            Err(LoanError::NotFound(id))
        }
    }

    async fn overdue(&self) -> Result<Vec<LoanDto>, LoanError> {
        let today = domain::today();
        let records = self.store.list_overdue_loans(today).await?;
        Ok(records
            .into_iter()
            .map(|r| LoanDto::from_record(r, today))
            .collect())
    }
}
