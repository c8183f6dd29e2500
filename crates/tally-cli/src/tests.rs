//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use tally_core::{GoalDirection, SchemaKind, SourceEncoding};

use crate::commands::{self, default_direction, parse_include, resolve_schema};

fn write_file(dir: &std::path::Path, name: &str, body: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body).unwrap();
    path
}

// ========== Schema Resolution Tests ==========

#[test]
fn test_resolve_schema_defaults() {
    let schema = resolve_schema("finance", None, None, None).unwrap();
    assert_eq!(schema.kind, SchemaKind::Finance);
    assert_eq!(schema.grouping_column, "Category");

    let schema = resolve_schema("retail", None, None, None).unwrap();
    assert_eq!(schema.kind, SchemaKind::Retail);
    assert_eq!(schema.encoding, SourceEncoding::Latin1);
}

#[test]
fn test_resolve_schema_overrides() {
    let schema = resolve_schema("retail", None, Some("utf8"), Some("Region")).unwrap();
    assert_eq!(schema.encoding, SourceEncoding::Utf8);
    assert_eq!(schema.grouping_column, "Region");
}

#[test]
fn test_resolve_schema_rejects_unknown_family() {
    assert!(resolve_schema("ledger", None, None, None).is_err());
}

#[test]
fn test_resolve_schema_from_mapping_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "map.toml",
        b"kind = \"finance\"\ngrouping_column = \"Merchant\"\namount_column = \"Value\"\n",
    );

    let schema = resolve_schema("retail", Some(&path), None, None).unwrap();
    // The mapping file wins over the --schema family
    assert_eq!(schema.kind, SchemaKind::Finance);
    assert_eq!(schema.grouping_column, "Merchant");
    assert_eq!(schema.amount_column.as_deref(), Some("Value"));
}

// ========== Helper Tests ==========

#[test]
fn test_parse_include() {
    assert_eq!(parse_include("Food,Rent"), vec!["Food", "Rent"]);
    assert_eq!(parse_include(" Food , Rent ,"), vec!["Food", "Rent"]);
    assert!(parse_include("").is_empty());
}

#[test]
fn test_default_direction_per_family() {
    assert_eq!(default_direction(SchemaKind::Finance), GoalDirection::Ceiling);
    assert_eq!(default_direction(SchemaKind::Retail), GoalDirection::Floor);
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "tx.csv",
        b"Date,Category,Amount\n2024-01-15,Food,-50.00\n2024-01-16,Pay,500.00\n",
    );

    let result = commands::cmd_report(
        &path, "finance", None, None, None, None, None, None, None, false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_json_with_goal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "tx.csv",
        b"Date,Category,Amount\n2024-01-15,Food,-50.00\n2024-01-16,Pay,500.00\n",
    );

    let result = commands::cmd_report(
        &path,
        "finance",
        None,
        None,
        None,
        Some("Food,Pay"),
        None,
        Some("100"),
        None,
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_rejects_bad_goal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "tx.csv", b"Date,Category,Amount\n");

    let result = commands::cmd_report(
        &path,
        "finance",
        None,
        None,
        None,
        None,
        None,
        Some("lots"),
        None,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_report_rejects_negative_goal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "tx.csv",
        b"Date,Category,Amount\n2024-01-15,Food,-50.00\n",
    );

    let result = commands::cmd_report(
        &path,
        "finance",
        None,
        None,
        None,
        None,
        None,
        Some("-5"),
        None,
        false,
    );
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("non-negative"));
}

#[test]
fn test_cmd_report_missing_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "tx.csv", b"When,What,HowMuch\n1,2,3\n");

    let result = commands::cmd_report(
        &path, "finance", None, None, None, None, None, None, None, false,
    );
    assert!(result.is_err());
}

// ========== Columns Command Tests ==========

#[test]
fn test_cmd_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "tx.csv", b" Date ,Category,Amount\n");

    let result = commands::cmd_columns(&path, None, None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_columns_missing_file() {
    let result = commands::cmd_columns(std::path::Path::new("/nonexistent/tx.csv"), None, None);
    assert!(result.is_err());
}
