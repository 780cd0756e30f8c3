use std::collections::BTreeSet;

use anyhow::{Context, Result};
use sea_orm::sea_query::{Condition, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::release_user_if_settled;
use crate::domain::BookCategory;
use crate::entities::{books, fines, loans, prelude::*};

/// Editable catalogue fields. The ISBN is the key and never changes.
#[derive(Debug, Clone)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
    pub category: BookCategory,
    pub total_stock: i32,
    pub available_stock: i32,
}

pub struct BookRepository {
    conn: DatabaseConnection,
}

impl BookRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Lists the catalogue, optionally narrowed to titles or authors containing `search`.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<books::Model>> {
        let mut query = Books::find().order_by_asc(books::Column::Title);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(
                Condition::any()
                    .add(books::Column::Title.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(books::Column::Author.like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        query.all(&self.conn).await.context("Failed to list books")
    }

    pub async fn get(&self, isbn: &str) -> Result<Option<books::Model>> {
        Books::find_by_id(isbn.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query book by ISBN")
    }

    pub async fn create(&self, isbn: String, fields: BookFields) -> Result<books::Model> {
        let model = books::ActiveModel {
            isbn: Set(isbn),
            title: Set(fields.title),
            author: Set(fields.author),
            publisher: Set(fields.publisher),
            year: Set(fields.year),
            category: Set(fields.category),
            total_stock: Set(fields.total_stock),
            available_stock: Set(fields.available_stock),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert book")?;

        info!("Catalogued book {} ({})", model.title, model.isbn);
        Ok(model)
    }

    pub async fn update(&self, isbn: &str, fields: BookFields) -> Result<Option<books::Model>> {
        let Some(existing) = self.get(isbn).await? else {
            return Ok(None);
        };

        let mut active: books::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.author = Set(fields.author);
        active.publisher = Set(fields.publisher);
        active.year = Set(fields.year);
        active.category = Set(fields.category);
        active.total_stock = Set(fields.total_stock);
        active.available_stock = Set(fields.available_stock);

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update book")?;
        Ok(Some(model))
    }

    /// Removes a book with every loan and fine that referenced it.
    ///
    /// Borrowers who lose a fine this way get their blocked flag re-evaluated.
    pub async fn delete(&self, isbn: &str) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let book_loans = Loans::find()
            .filter(loans::Column::BookIsbn.eq(isbn))
            .all(&txn)
            .await?;

        let borrowers: BTreeSet<i32> = book_loans.iter().map(|l| l.user_id).collect();
        let loan_ids: Vec<i32> = book_loans.iter().map(|l| l.id).collect();

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

        let result = Books::delete_by_id(isbn.to_string()).exec(&txn).await?;

        for user_id in borrowers {
            release_user_if_settled(&txn, user_id).await?;
        }

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed book with ISBN: {}", isbn);
        }
        Ok(removed)
    }
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("java"), "java");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
