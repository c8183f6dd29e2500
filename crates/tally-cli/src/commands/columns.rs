//! Header diagnosis command

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::read_headers;

use super::resolve_schema;

/// Print the trimmed header names found in a source file.
///
/// Handy when a load fails with a missing-column error: the output shows
/// exactly what a mapping file needs to name.
pub fn cmd_columns(file: &Path, config: Option<&Path>, encoding: Option<&str>) -> Result<()> {
    // The schema family is irrelevant here; only the encoding matters
    let schema = resolve_schema("finance", config, encoding, None)?;

    let headers = read_headers(file, schema.encoding)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!();
    println!("📋 Columns in {}", file.display());
    for header in &headers {
        println!("   - {}", header);
    }
    println!();

    Ok(())
}
