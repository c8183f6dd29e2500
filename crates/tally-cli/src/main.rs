//! Tally CLI - Transaction summarizer
//!
//! Usage:
//!   tally report --file CSV            Summarize a transaction file
//!   tally report --file CSV --goal N   Summarize and check a goal
//!   tally columns --file CSV           Show the header columns found

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Report {
            file,
            schema,
            config,
            encoding,
            grouping_column,
            include,
            query,
            goal,
            direction,
            json,
        } => commands::cmd_report(
            &file,
            &schema,
            config.as_deref(),
            encoding.as_deref(),
            grouping_column.as_deref(),
            include.as_deref(),
            query.as_deref(),
            goal.as_deref(),
            direction.as_deref(),
            json,
        ),
        Commands::Columns {
            file,
            config,
            encoding,
        } => commands::cmd_columns(&file, config.as_deref(), encoding.as_deref()),
    }
}
