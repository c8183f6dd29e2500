//! CSV schema configuration
//!
//! Two schema families exist in the wild: finance exports with a signed
//! amount column, and retail exports with quantity × unit price. Both are
//! described by a [`CsvSchema`] column mapping so one loader serves both.
//!
//! ## Configuration Resolution
//!
//! A mapping is resolved in two layers:
//! 1. An explicit TOML mapping file, when the caller provides one
//! 2. Built-in defaults per schema kind ([`CsvSchema::finance`],
//!    [`CsvSchema::retail`])

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which schema family a source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Signed amounts: expenses negative, income positive
    Finance,
    /// Quantity and unit price per row; all totals are revenue
    Retail,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Retail => "retail",
        }
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "retail" => Ok(Self::Retail),
            _ => Err(format!("Unknown schema kind: {}", s)),
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character encoding of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
        }
    }
}

impl std::str::FromStr for SourceEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(format!("Unknown encoding: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_encoding() -> SourceEncoding {
    SourceEncoding::Utf8
}

/// Column mapping for one deployment's CSV layout.
///
/// Header names are whitespace-trimmed before matching, so a mapping of
/// `"Amount"` also matches `" Amount "` in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvSchema {
    pub kind: SchemaKind,
    #[serde(default = "default_encoding")]
    pub encoding: SourceEncoding,
    /// Date column; optional because some retail exports carry no dates
    #[serde(default)]
    pub date_column: Option<String>,
    /// The categorical column records are filtered and aggregated by
    pub grouping_column: String,
    /// Item description column (retail; also the free-text filter target)
    #[serde(default)]
    pub item_column: Option<String>,
    /// Signed amount column (finance family)
    #[serde(default)]
    pub amount_column: Option<String>,
    /// Quantity column (retail family)
    #[serde(default)]
    pub quantity_column: Option<String>,
    /// Unit price column (retail family)
    #[serde(default)]
    pub price_column: Option<String>,
}

impl CsvSchema {
    /// Default finance mapping: Date, Category, Amount
    pub fn finance() -> Self {
        Self {
            kind: SchemaKind::Finance,
            encoding: SourceEncoding::Utf8,
            date_column: Some("Date".to_string()),
            grouping_column: "Category".to_string(),
            item_column: None,
            amount_column: Some("Amount".to_string()),
            quantity_column: None,
            price_column: None,
        }
    }

    /// Default retail mapping: Country, Description, Quantity, UnitPrice
    pub fn retail() -> Self {
        Self {
            kind: SchemaKind::Retail,
            encoding: SourceEncoding::Latin1,
            date_column: None,
            grouping_column: "Country".to_string(),
            item_column: Some("Description".to_string()),
            amount_column: None,
            quantity_column: Some("Quantity".to_string()),
            price_column: Some("UnitPrice".to_string()),
        }
    }

    /// Built-in default mapping for a schema kind
    pub fn defaults(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Finance => Self::finance(),
            SchemaKind::Retail => Self::retail(),
        }
    }

    /// Load a mapping from a TOML override file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Rename the grouping column, keeping everything else
    pub fn with_grouping_column(mut self, name: impl Into<String>) -> Self {
        self.grouping_column = name.into();
        self
    }

    /// Override the source encoding
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!("finance".parse::<SchemaKind>().unwrap(), SchemaKind::Finance);
        assert_eq!("Retail".parse::<SchemaKind>().unwrap(), SchemaKind::Retail);
        assert!("ledger".parse::<SchemaKind>().is_err());
        assert_eq!(SchemaKind::Finance.to_string(), "finance");
    }

    #[test]
    fn test_encoding_aliases() {
        assert_eq!("utf-8".parse::<SourceEncoding>().unwrap(), SourceEncoding::Utf8);
        assert_eq!(
            "iso-8859-1".parse::<SourceEncoding>().unwrap(),
            SourceEncoding::Latin1
        );
        assert!("utf16".parse::<SourceEncoding>().is_err());
    }

    #[test]
    fn test_defaults() {
        let finance = CsvSchema::defaults(SchemaKind::Finance);
        assert_eq!(finance.grouping_column, "Category");
        assert_eq!(finance.amount_column.as_deref(), Some("Amount"));
        assert!(finance.quantity_column.is_none());

        let retail = CsvSchema::defaults(SchemaKind::Retail);
        assert_eq!(retail.grouping_column, "Country");
        assert_eq!(retail.encoding, SourceEncoding::Latin1);
        assert_eq!(retail.price_column.as_deref(), Some("UnitPrice"));
    }

    #[test]
    fn test_mapping_from_toml() {
        let toml_src = r#"
kind = "finance"
grouping_column = "Kategorie"
date_column = "Datum"
amount_column = "Betrag"
encoding = "latin1"
"#;
        let schema: CsvSchema = toml::from_str(toml_src).unwrap();
        assert_eq!(schema.kind, SchemaKind::Finance);
        assert_eq!(schema.grouping_column, "Kategorie");
        assert_eq!(schema.encoding, SourceEncoding::Latin1);
        assert!(schema.item_column.is_none());
    }

    #[test]
    fn test_with_grouping_column() {
        let schema = CsvSchema::retail().with_grouping_column("Region");
        assert_eq!(schema.grouping_column, "Region");
        assert_eq!(schema.kind, SchemaKind::Retail);
    }
}
