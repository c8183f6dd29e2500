//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Summarize transaction files and track goals
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Transaction summarizer with goal tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a transaction file
    Report {
        /// CSV file to summarize
        #[arg(short, long)]
        file: PathBuf,

        /// Schema family: finance or retail
        #[arg(short, long, default_value = "finance")]
        schema: String,

        /// Schema mapping file (TOML) overriding the built-in defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Source encoding: utf8 or latin1 (overrides the mapping)
        #[arg(long)]
        encoding: Option<String>,

        /// Grouping column name (overrides the mapping)
        #[arg(long)]
        grouping_column: Option<String>,

        /// Grouping keys to include (comma-separated; defaults to all)
        #[arg(long)]
        include: Option<String>,

        /// Case-insensitive substring filter on item descriptions
        #[arg(short, long)]
        query: Option<String>,

        /// Goal target amount
        #[arg(short, long)]
        goal: Option<String>,

        /// Goal direction: ceiling (budget) or floor (revenue)
        ///
        /// Defaults per schema family: finance goals are spending
        /// ceilings, retail goals are revenue floors.
        #[arg(long)]
        direction: Option<String>,

        /// Output the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the header columns found in a file
    Columns {
        /// CSV file to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// Schema mapping file (TOML), used for its encoding setting
        #[arg(long)]
        config: Option<PathBuf>,

        /// Source encoding: utf8 or latin1
        #[arg(long)]
        encoding: Option<String>,
    },
}
