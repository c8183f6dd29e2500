//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `columns` - Header diagnosis command
//! - `report` - Summary/goal report command

pub mod columns;
pub mod report;

// Re-export command functions for main.rs
pub use columns::*;
pub use report::*;

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use tally_core::{CsvSchema, SchemaKind, SourceEncoding};

/// Resolve the effective CSV schema for a command.
///
/// A mapping file wins over the `--schema` family default; `--encoding`
/// and `--grouping-column` then override whichever base was chosen.
pub fn resolve_schema(
    schema: &str,
    config: Option<&Path>,
    encoding: Option<&str>,
    grouping_column: Option<&str>,
) -> Result<CsvSchema> {
    let mut resolved = match config {
        Some(path) => CsvSchema::from_toml_file(path)
            .with_context(|| format!("Failed to load schema mapping {}", path.display()))?,
        None => {
            let kind = SchemaKind::from_str(schema).map_err(anyhow::Error::msg)?;
            CsvSchema::defaults(kind)
        }
    };

    if let Some(enc) = encoding {
        let enc = SourceEncoding::from_str(enc).map_err(anyhow::Error::msg)?;
        resolved = resolved.with_encoding(enc);
    }
    if let Some(name) = grouping_column {
        resolved = resolved.with_grouping_column(name);
    }

    Ok(resolved)
}
