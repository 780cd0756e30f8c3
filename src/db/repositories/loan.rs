use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::{release_user_if_settled, restock};
use crate::domain::LoanState;
use crate::entities::{books, fines, loans, prelude::*, users};

/// A loan with the rows it is usually displayed alongside.
#[derive(Debug, Clone)]
pub struct LoanRecord {
    pub loan: loans::Model,
    pub user: Option<users::Model>,
    pub book: Option<books::Model>,
    pub fine: Option<fines::Model>,
}

/// Charge to raise when a loan comes back late.
#[derive(Debug, Clone, Copy)]
pub struct LateCharge {
    pub overdue_days: i32,
    pub daily_rate: i32,
}

pub struct LoanRepository {
    conn: DatabaseConnection,
}

impl LoanRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn attach(&self, rows: Vec<loans::Model>) -> Result<Vec<LoanRecord>> {
        let users = rows.load_one(Users, &self.conn).await?;
        let books = rows.load_one(Books, &self.conn).await?;
        let fines = rows.load_one(Fines, &self.conn).await?;

        Ok(rows
            .into_iter()
            .zip(users)
            .zip(books)
            .zip(fines)
            .map(|(((loan, user), book), fine)| LoanRecord {
                loan,
                user,
                book,
                fine,
            })
            .collect())
    }

    /// All loans, newest first.
    pub async fn list(&self) -> Result<Vec<LoanRecord>> {
        let rows = Loans::find()
            .order_by_desc(loans::Column::LoanedAt)
            .order_by_desc(loans::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list loans")?;

        self.attach(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<loans::Model>> {
        Loans::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query loan by ID")
    }

    pub async fn get_record(&self, id: i32) -> Result<Option<LoanRecord>> {
        let Some(loan) = self.get(id).await? else {
            return Ok(None);
        };
        Ok(self.attach(vec![loan]).await?.pop())
    }

    /// Lends one copy of `isbn` to `user_id`.
    ///
    /// Returns `None` without writing anything when no copy is left.
    pub async fn open(
        &self,
        user_id: i32,
        isbn: &str,
        loaned_at: DateTime<Utc>,
        expected_return_date: NaiveDate,
    ) -> Result<Option<loans::Model>> {
        let txn = self.conn.begin().await?;

        let taken = Books::update_many()
            .col_expr(
                books::Column::AvailableStock,
                Expr::col(books::Column::AvailableStock).sub(1),
            )
            .filter(books::Column::Isbn.eq(isbn))
            .filter(books::Column::AvailableStock.gt(0))
            .exec(&txn)
            .await?;

        if taken.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let loan = loans::ActiveModel {
            user_id: Set(user_id),
            book_isbn: Set(isbn.to_string()),
            loaned_at: Set(loaned_at),
            expected_return_date: Set(expected_return_date),
            actual_return_date: Set(None),
            state: Set(LoanState::Active),
            renewed: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert loan")?;

        txn.commit().await?;
        info!(
            "Opened loan {} of {} for user {}, due {}",
            loan.id, isbn, user_id, expected_return_date
        );
        Ok(Some(loan))
    }

    /// Marks the loan's single renewal and moves its due date.
    pub async fn renew(&self, loan: loans::Model, new_due: NaiveDate) -> Result<loans::Model> {
        let mut active: loans::ActiveModel = loan.into();
        active.expected_return_date = Set(new_due);
        active.renewed = Set(true);
        active
            .update(&self.conn)
            .await
            .context("Failed to renew loan")
    }

    /// Closes a loan, shelves the copy and, for late returns, raises the fine
    /// and blocks the borrower.
    pub async fn close(
        &self,
        loan: loans::Model,
        returned_on: NaiveDate,
        charge: Option<LateCharge>,
    ) -> Result<(loans::Model, Option<fines::Model>)> {
        let txn = self.conn.begin().await?;

        let user_id = loan.user_id;
        let isbn = loan.book_isbn.clone();

        let mut active: loans::ActiveModel = loan.into();
        active.actual_return_date = Set(Some(returned_on));
        active.state = Set(LoanState::Returned);
        let loan = active.update(&txn).await?;

        restock(&txn, &isbn).await?;

        let fine = match charge {
            Some(charge) => {
                let fine = fines::ActiveModel {
                    loan_id: Set(loan.id),
                    overdue_days: Set(charge.overdue_days),
                    daily_rate: Set(charge.daily_rate),
                    paid: Set(false),
                    generated_at: Set(Utc::now()),
                    paid_at: Set(None),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .context("Failed to insert fine")?;

                Users::update_many()
                    .col_expr(users::Column::Blocked, Expr::value(true))
                    .filter(users::Column::Id.eq(user_id))
                    .exec(&txn)
                    .await?;

                Some(fine)
            }
            None => None,
        };

        txn.commit().await?;
        Ok((loan, fine))
    }

    pub async fn update_due_date(
        &self,
        id: i32,
        expected_return_date: NaiveDate,
    ) -> Result<Option<loans::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: loans::ActiveModel = existing.into();
        active.expected_return_date = Set(expected_return_date);
        let loan = active
            .update(&self.conn)
            .await
            .context("Failed to update loan")?;
        Ok(Some(loan))
    }

    /// Deletes a loan and its fine. An unreturned copy goes back on the shelf
    /// and the borrower's blocked flag is re-evaluated.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(loan) = Loans::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        Fines::delete_many()
            .filter(fines::Column::LoanId.eq(id))
            .exec(&txn)
            .await?;

        if loan.state != LoanState::Returned {
            restock(&txn, &loan.book_isbn).await?;
        }

        Loans::delete_by_id(id).exec(&txn).await?;
        release_user_if_settled(&txn, loan.user_id).await?;

        txn.commit().await?;
        info!("Removed loan with ID: {}", id);
        Ok(true)
    }

    /// Active loans whose due date is before `today`.
    pub async fn list_overdue(&self, today: NaiveDate) -> Result<Vec<LoanRecord>> {
        let rows = Loans::find()
            .filter(loans::Column::State.eq(LoanState::Active))
            .filter(loans::Column::ExpectedReturnDate.lt(today))
            .order_by_asc(loans::Column::ExpectedReturnDate)
            .all(&self.conn)
            .await
            .context("Failed to list overdue loans")?;

        self.attach(rows).await
    }
}
