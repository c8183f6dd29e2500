//! Summary/goal report command

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::{
    compare_to_goal, filter, load, summarize, FilterSelection, GoalDirection, GoalStatus,
    GoalTarget, SchemaKind, SummaryResult,
};

use super::resolve_schema;

/// JSON document for `--json` output
#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: &'a SummaryResult,
    goal: Option<&'a GoalStatus>,
    skipped_rows: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_report(
    file: &Path,
    schema: &str,
    config: Option<&Path>,
    encoding: Option<&str>,
    grouping_column: Option<&str>,
    include: Option<&str>,
    query: Option<&str>,
    goal: Option<&str>,
    direction: Option<&str>,
    json: bool,
) -> Result<()> {
    let schema = resolve_schema(schema, config, encoding, grouping_column)?;

    let outcome = load(file, &schema)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let mut selection = match include {
        Some(keys) => FilterSelection::of(parse_include(keys)),
        None => FilterSelection::all_of(&outcome.records),
    };
    if let Some(q) = query {
        selection = selection.with_query(q);
    }

    let records = filter(&outcome.records, &selection);
    let summary = summarize(&records, schema.kind);

    let status = match goal {
        Some(target) => {
            let target: Decimal = target
                .parse()
                .with_context(|| format!("Invalid goal amount: {}", target))?;
            // Targets are thresholds; a negative one has no meaning
            if target < Decimal::ZERO {
                anyhow::bail!("Goal target must be non-negative, got {}", target);
            }
            let direction = match direction {
                Some(d) => GoalDirection::from_str(d).map_err(anyhow::Error::msg)?,
                None => default_direction(schema.kind),
            };
            Some(compare_to_goal(&summary, &GoalTarget::new(target, direction)))
        }
        None => None,
    };

    if json {
        let doc = ReportDocument {
            summary: &summary,
            goal: status.as_ref(),
            skipped_rows: outcome.skipped_rows,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_report(file, &summary, status.as_ref(), outcome.skipped_rows);
    Ok(())
}

/// Split a comma-separated `--include` list into trimmed keys
pub fn parse_include(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Finance goals default to spending ceilings, retail to revenue floors
pub fn default_direction(kind: SchemaKind) -> GoalDirection {
    match kind {
        SchemaKind::Finance => GoalDirection::Ceiling,
        SchemaKind::Retail => GoalDirection::Floor,
    }
}

fn print_report(
    file: &Path,
    summary: &SummaryResult,
    status: Option<&GoalStatus>,
    skipped_rows: usize,
) {
    println!();
    println!("📒 Transaction Summary ({})", summary.schema);
    println!("   Source: {}", file.display());
    println!("   ─────────────────────────────────────────────");

    match summary.schema {
        SchemaKind::Finance => {
            println!("   Income:    {:>14.2}", summary.total_income);
            println!("   Expenses:  {:>14.2}", summary.total_expense.abs());
            println!("   Net:       {:>14.2}", summary.net_balance);
        }
        SchemaKind::Retail => {
            println!("   Revenue:   {:>14.2}", summary.total_income);
            println!("   Units:     {:>14}", summary.total_units);
        }
    }

    if skipped_rows > 0 {
        println!("   ⚠️  {} malformed row(s) skipped", skipped_rows);
    }

    if !summary.top_groups.is_empty() {
        println!();
        println!("🏆 Top groups");
        for (i, group) in summary.top_groups.iter().enumerate() {
            println!("   {:>2}. {:<24} {:>14.2}", i + 1, group.key, group.total);
        }
    }

    if let Some(status) = status {
        println!();
        println!("🎯 Goal");
        let percent = status.percent_used * Decimal::from(100);
        if status.met {
            println!("   ✅ Goal met ({:.1}% of target used)", percent);
        } else {
            println!("   🚨 Goal missed by {:.2}", status.delta.abs());
        }
    }

    println!();
}
