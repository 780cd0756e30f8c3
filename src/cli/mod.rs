//! CLI module - Command-line interface for Biblioteca
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// Biblioteca - library circulation desk
/// Members, books, loans and fines over a JSON API
#[derive(Parser)]
#[command(name = "biblioteca")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API and the overdue report scheduler
    #[command(alias = "daemon")]
    Serve,

    /// Load demo members, books and loans
    Seed {
        /// Keep existing data instead of wiping it first
        #[arg(long)]
        keep: bool,
    },

    /// List registered members
    #[command(alias = "u")]
    Users,

    /// List the catalogue
    #[command(alias = "b")]
    Books {
        /// Only books whose title or author contains this text
        #[arg(long, short)]
        search: Option<String>,
    },

    /// List loans, newest first
    #[command(alias = "l")]
    Loans,

    /// List fines
    #[command(alias = "f")]
    Fines,

    /// Run the overdue report once
    Overdue,

    /// Create a default config.toml in the current directory
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_keep() {
        let cli = Cli::try_parse_from(["biblioteca", "seed", "--keep"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Seed { keep: true }));
    }

    #[test]
    fn test_parse_books_search() {
        let cli = Cli::try_parse_from(["biblioteca", "books", "--search", "java"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Books {
                search: Some("java".to_string())
            })
        );
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["biblioteca"]).unwrap();
        assert!(cli.command.is_none());
    }
}
