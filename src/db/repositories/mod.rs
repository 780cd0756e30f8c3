pub mod book;
pub mod fine;
pub mod loan;
pub mod user;

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use tracing::info;

use crate::domain::should_unblock;
use crate::entities::{books, fines, loans, prelude::*, users};

/// Puts one copy of `isbn` back on the shelf, never above the book's total stock.
pub(crate) async fn restock<C>(conn: &C, isbn: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    Books::update_many()
        .col_expr(
            books::Column::AvailableStock,
            Expr::col(books::Column::AvailableStock).add(1),
        )
        .filter(books::Column::Isbn.eq(isbn))
        .filter(Expr::col(books::Column::AvailableStock).lt(Expr::col(books::Column::TotalStock)))
        .exec(conn)
        .await?;
    Ok(())
}

/// Clears the blocked flag of `user_id` once none of their remaining fines is unpaid.
///
/// Returns `true` when the flag actually flipped.
pub(crate) async fn release_user_if_settled<C>(conn: &C, user_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let paid_flags: Vec<bool> = Fines::find()
        .select_only()
        .column(fines::Column::Paid)
        .inner_join(Loans)
        .filter(loans::Column::UserId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await?;

    if !should_unblock(paid_flags) {
        return Ok(false);
    }

    let result = Users::update_many()
        .col_expr(users::Column::Blocked, Expr::value(false))
        .filter(users::Column::Id.eq(user_id))
        .filter(users::Column::Blocked.eq(true))
        .exec(conn)
        .await?;

    let released = result.rows_affected > 0;
    if released {
        info!("Unblocked user {} after all fines were settled", user_id);
    }
    Ok(released)
}
