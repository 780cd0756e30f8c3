//! Listing command handlers

use anyhow::Result;

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_users(config: &Config) -> Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let users = state.user_service.list().await?;

    if users.is_empty() {
        println!("No users registered.");
        println!();
        println!("Load demo data with: biblioteca seed");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let status = if user.blocked { "🔒" } else { "•" };
        println!("{} {} [{}]", status, user.name, user.user_type);
        println!(
            "  ID: {} | National ID: {} | Email: {} | Loan days: {}",
            user.id, user.national_id, user.email, user.loan_days
        );
    }

    println!();
    println!("Legend: 🔒 Blocked by unpaid fines");

    Ok(())
}

pub async fn cmd_list_books(config: &Config, search: Option<&str>) -> Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let books = state.book_service.list(search).await?;

    if books.is_empty() {
        match search {
            Some(term) => println!("No books match \"{}\".", term),
            None => println!("The catalogue is empty."),
        }
        return Ok(());
    }

    println!("Books ({} total)", books.len());
    println!("{:-<70}", "");

    for book in books {
        let status = if book.available { "✓" } else { "✗" };
        println!("{} {} - {} ({})", status, book.title, book.author, book.year);
        println!(
            "  ISBN: {} | Category: {} | Stock: {}/{}",
            book.isbn, book.category, book.available_stock, book.total_stock
        );
    }

    Ok(())
}

pub async fn cmd_list_loans(config: &Config) -> Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let loans = state.loan_service.list().await?;

    if loans.is_empty() {
        println!("No loans recorded.");
        return Ok(());
    }

    println!("Loans ({} total)", loans.len());
    println!("{:-<70}", "");

    for loan in loans {
        println!(
            "#{} {} → {} [{}]{}",
            loan.id,
            loan.book_title,
            loan.user_name,
            loan.state,
            if loan.renewed { " (renewed)" } else { "" }
        );

        let returned = loan
            .actual_return_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        println!(
            "  Due: {} | Returned: {} | Overdue days: {}",
            loan.expected_return_date, returned, loan.overdue_days
        );

        if let Some(fine) = loan.fine {
            println!(
                "  Fine #{}: {} ({})",
                fine.id,
                fine.total_amount,
                if fine.paid { "paid" } else { "unpaid" }
            );
        }
    }

    Ok(())
}

pub async fn cmd_list_fines(config: &Config) -> Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let fines = state.fine_service.list().await?;

    if fines.is_empty() {
        println!("No fines.");
        return Ok(());
    }

    println!("Fines ({} total)", fines.len());
    println!("{:-<70}", "");

    let mut outstanding = 0_i64;
    for fine in fines {
        if !fine.paid {
            outstanding += fine.total_amount;
        }
        println!(
            "{} Fine #{} on loan #{}: {} days × {} = {}",
            if fine.paid { "✓" } else { "•" },
            fine.id,
            fine.loan_id,
            fine.overdue_days,
            fine.daily_rate,
            fine.total_amount
        );
    }

    println!();
    println!("Outstanding: {}", outstanding);

    Ok(())
}
