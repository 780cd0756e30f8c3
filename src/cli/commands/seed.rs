//! Demo data command handler

use anyhow::Result;

use crate::config::Config;
use crate::db::Store;
use crate::services::seed_demo;

pub async fn cmd_seed(config: &Config, keep: bool) -> Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let summary = seed_demo(&store, keep).await?;

    println!("✓ Demo data created");
    println!();
    println!("Summary:");
    println!("  - Users: {}", summary.users);
    println!("  - Books: {}", summary.books);
    println!("  - Loans: {}", summary.loans);

    Ok(())
}
