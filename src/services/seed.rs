//! Demo data for trying the desk out.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use tracing::info;

use crate::db::{BookFields, NewUser, Store};
use crate::domain::{self, BookCategory, LoanState, UserType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub books: usize,
    pub loans: usize,
}

fn demo_user(national_id: &str, name: &str, email: &str, phone: &str, user_type: UserType) -> NewUser {
    NewUser {
        national_id: national_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        user_type,
    }
}

fn demo_book(
    isbn: &str,
    title: &str,
    author: &str,
    publisher: &str,
    year: i32,
    category: BookCategory,
    stock: i32,
) -> (String, BookFields) {
    (
        isbn.to_string(),
        BookFields {
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            year,
            category,
            total_stock: stock,
            available_stock: stock,
        },
    )
}

/// Loads three members, five books, one running loan and one loan five days
/// past due marked `OVERDUE`.
///
/// Existing data is wiped first unless `keep` is set.
pub async fn seed_demo(store: &Store, keep: bool) -> Result<SeedSummary> {
    if !keep {
        store.wipe().await?;
    }

    let users = [
        demo_user("12345678-9", "Juan Pérez", "juan@mail.com", "912345678", UserType::Student),
        demo_user("98765432-1", "María García", "maria@mail.com", "987654321", UserType::Teacher),
        demo_user("11111111-1", "Carlos López", "carlos@mail.com", "", UserType::Student),
    ];

    let mut user_ids = Vec::with_capacity(users.len());
    for user in users {
        user_ids.push(store.create_user(user).await?.id);
    }

    let books = [
        demo_book("9780134685991", "Effective Java", "Joshua Bloch", "Addison-Wesley", 2018, BookCategory::Programming, 3),
        demo_book("9781491950357", "JavaScript: The Good Parts", "Douglas Crockford", "O'Reilly", 2008, BookCategory::Programming, 2),
        demo_book("9780596517748", "JavaScript: The Definitive Guide", "David Flanagan", "O'Reilly", 2020, BookCategory::Programming, 2),
        demo_book("9781449373320", "Designing Data-Intensive Applications", "Martin Kleppmann", "O'Reilly", 2017, BookCategory::Databases, 2),
        demo_book("9780135166307", "Clean Architecture", "Robert C. Martin", "Prentice Hall", 2017, BookCategory::OperatingSystems, 3),
    ];

    let mut isbns = Vec::with_capacity(books.len());
    for (isbn, fields) in books {
        isbns.push(store.create_book(isbn, fields).await?.isbn);
    }

    let today = domain::today();

    store
        .open_loan(user_ids[0], &isbns[0], Utc::now(), today + Duration::days(7))
        .await?
        .context("Demo book has no copies left")?;

    let late = store
        .open_loan(user_ids[2], &isbns[1], Utc::now(), today - Duration::days(5))
        .await?
        .context("Demo book has no copies left")?;
    store.set_loan_state(late.id, LoanState::Overdue).await?;

    let summary = SeedSummary {
        users: user_ids.len(),
        books: isbns.len(),
        loans: 2,
    };
    info!(
        "Demo data loaded: {} users, {} books, {} loans",
        summary.users, summary.books, summary.loans
    );
    Ok(summary)
}
