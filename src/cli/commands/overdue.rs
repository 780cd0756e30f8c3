//! One-off overdue report

use anyhow::Result;

use crate::config::Config;
use crate::services::scheduler::report_overdue;
use crate::state::SharedState;

pub async fn cmd_overdue(config: &Config) -> Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let overdue = report_overdue(state.loan_service.as_ref()).await?;

    if overdue.is_empty() {
        println!("No overdue loans.");
        return Ok(());
    }

    println!("Overdue loans ({} total)", overdue.len());
    println!("{:-<70}", "");

    for loan in overdue {
        println!(
            "#{} {} → {}: due {}, {} day(s) late",
            loan.id, loan.book_title, loan.user_name, loan.expected_return_date, loan.overdue_days
        );
    }

    Ok(())
}
