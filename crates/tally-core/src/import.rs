//! CSV loading for finance and retail transaction sources
//!
//! The loader is schema-driven: a [`CsvSchema`] names the columns for one
//! deployment's layout and the same code path serves both families. Rows
//! with malformed numeric or date fields are skipped and counted rather
//! than aborting the whole load; a missing required column is fatal and
//! the error lists the columns actually found.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{UTF_8, WINDOWS_1252};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{LoadOutcome, TransactionRecord};
use crate::schema::{CsvSchema, SchemaKind, SourceEncoding};

/// Load a transaction source from a file path
pub fn load(path: &Path, schema: &CsvSchema) -> Result<LoadOutcome> {
    let bytes = fs::read(path)?;
    let outcome = load_from_bytes(&bytes, schema)?;
    debug!(
        "Loaded {} records from {} ({} skipped)",
        outcome.records.len(),
        path.display(),
        outcome.skipped_rows
    );
    Ok(outcome)
}

/// Load a transaction source from raw bytes
pub fn load_from_bytes(bytes: &[u8], schema: &CsvSchema) -> Result<LoadOutcome> {
    let content = decode(bytes, schema.encoding)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    // Header names are whitespace-trimmed before matching
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let columns = ColumnIndices::resolve(&headers, schema)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0usize;

    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;
        match parse_row(&record, &columns, schema.kind) {
            Ok(Some(tx)) => records.push(tx),
            // Retail rows with non-positive derived totals are returns or
            // entry errors, dropped without counting as malformed
            Ok(None) => {
                debug!("Dropped non-positive retail row {}", row_index + 2);
            }
            Err(e) => {
                warn!("Skipping malformed row {}: {}", row_index + 2, e);
                skipped_rows += 1;
            }
        }
    }

    Ok(LoadOutcome {
        records,
        skipped_rows,
    })
}

/// Read just the trimmed header names from a source file.
///
/// Used to diagnose schema mismatches without attempting a full load.
pub fn read_headers(path: &Path, encoding: SourceEncoding) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let content = decode(&bytes, encoding)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    Ok(rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

/// Resolved positions of the schema's columns in the header row
struct ColumnIndices {
    date: Option<usize>,
    group: usize,
    item: Option<usize>,
    measure: MeasureColumns,
}

/// Where the aggregation measure comes from, per schema family
enum MeasureColumns {
    Finance { amount: usize },
    Retail { quantity: usize, price: usize },
}

impl ColumnIndices {
    fn resolve(headers: &[String], schema: &CsvSchema) -> Result<Self> {
        let required = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::Schema {
                    column: name.to_string(),
                    found: headers.to_vec(),
                })
        };
        let optional =
            |name: &Option<String>| name.as_deref().and_then(|n| headers.iter().position(|h| h == n));

        let group = required(&schema.grouping_column)?;

        let measure = match schema.kind {
            SchemaKind::Finance => {
                let name = schema.amount_column.as_deref().unwrap_or("Amount");
                MeasureColumns::Finance {
                    amount: required(name)?,
                }
            }
            SchemaKind::Retail => {
                let qty_name = schema.quantity_column.as_deref().unwrap_or("Quantity");
                let price_name = schema.price_column.as_deref().unwrap_or("UnitPrice");
                MeasureColumns::Retail {
                    quantity: required(qty_name)?,
                    price: required(price_name)?,
                }
            }
        };

        Ok(Self {
            date: optional(&schema.date_column),
            group,
            item: optional(&schema.item_column),
            measure,
        })
    }
}

/// Parse one data row into a typed record.
///
/// Returns `Ok(None)` for retail rows whose derived total is non-positive.
fn parse_row(
    record: &StringRecord,
    columns: &ColumnIndices,
    kind: SchemaKind,
) -> Result<Option<TransactionRecord>> {
    let field = |idx: usize| record.get(idx).map(|s| s.trim());

    let group = field(columns.group)
        .ok_or_else(|| Error::InvalidData("Missing grouping value".into()))?
        .to_string();

    let date = match columns.date.and_then(field) {
        Some(s) if !s.is_empty() => Some(parse_date(s)?),
        _ => None,
    };

    let description = columns
        .item
        .and_then(field)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let (amount, quantity) = match columns.measure {
        MeasureColumns::Finance { amount } => {
            let s = field(amount).ok_or_else(|| Error::InvalidData("Missing amount".into()))?;
            (parse_amount(s)?, 1)
        }
        MeasureColumns::Retail { quantity, price } => {
            let qty_str =
                field(quantity).ok_or_else(|| Error::InvalidData("Missing quantity".into()))?;
            let price_str =
                field(price).ok_or_else(|| Error::InvalidData("Missing unit price".into()))?;
            let units: i64 = qty_str
                .parse()
                .map_err(|_| Error::InvalidData(format!("Unable to parse quantity: {}", qty_str)))?;
            let unit_price = parse_amount(price_str)?;
            (Decimal::from(units) * unit_price, units)
        }
    };

    if kind == SchemaKind::Retail && amount <= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(TransactionRecord {
        date,
        group,
        description,
        amount,
        quantity,
    }))
}

/// Decode source bytes to text per the configured encoding.
///
/// UTF-8 decoding strips a leading BOM; Latin-1 sources go through
/// Windows-1252, which covers the accented text seen in real exports.
fn decode(bytes: &[u8], encoding: SourceEncoding) -> Result<Cow<'_, str>> {
    match encoding {
        SourceEncoding::Utf8 => {
            let (text, _, had_errors) = UTF_8.decode(bytes);
            if had_errors {
                return Err(Error::Encoding(
                    "Source is not valid UTF-8; try encoding = latin1".into(),
                ));
            }
            Ok(text)
        }
        SourceEncoding::Latin1 => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            Ok(text)
        }
    }
}

/// Parse a date string in various common formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // Try common date formats
    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Retail exports often carry a timestamp
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%m/%d/%Y %H:%M") {
        return Ok(dt.date());
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', '£', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<Decimal>()
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))
}
