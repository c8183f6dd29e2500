//! Data models for the Tally transaction summarizer

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::SchemaKind;

/// One typed row of the source data.
///
/// `amount` is the sole aggregation measure: the signed amount for finance
/// sources (expenses negative, income positive) or the derived
/// `quantity × unit_price` total for retail sources, computed once at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date, when the source provides one
    pub date: Option<NaiveDate>,
    /// Grouping key (category for finance sources, country for retail)
    pub group: String,
    /// Free-text item description, when the source provides one
    pub description: Option<String>,
    /// Signed monetary measure
    pub amount: Decimal,
    /// Unit count; 1 for finance rows
    pub quantity: i64,
}

/// The set of grouping-key values a session has chosen to include.
///
/// An empty `included_keys` set filters to *nothing*, never to everything.
/// Callers wanting the unfiltered view build the selection with
/// [`FilterSelection::all_of`] after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Grouping keys to keep
    pub included_keys: BTreeSet<String>,
    /// Optional case-insensitive substring match on `description`
    pub description_query: Option<String>,
}

impl FilterSelection {
    /// Selection covering every grouping key present in `records`.
    ///
    /// This is the required default after load; it is what makes "no filter
    /// applied yet" mean "all records" rather than relying on an empty set.
    pub fn all_of(records: &[TransactionRecord]) -> Self {
        Self {
            included_keys: records.iter().map(|r| r.group.clone()).collect(),
            description_query: None,
        }
    }

    /// Selection limited to the given keys
    pub fn of<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            included_keys: keys.into_iter().map(Into::into).collect(),
            description_query: None,
        }
    }

    /// Attach a free-text description query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.description_query = Some(query.into());
        self
    }
}

/// Which way a goal comparison points.
///
/// The two deployment families need opposite semantics: a finance budget is
/// a spending ceiling, a retail target is a revenue floor. The direction is
/// configuration, never hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    /// Spending must stay at or below the target
    Ceiling,
    /// Revenue must reach at least the target
    Floor,
}

impl GoalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
        }
    }
}

impl std::str::FromStr for GoalDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ceiling" | "budget" => Ok(Self::Ceiling),
            "floor" | "revenue" => Ok(Self::Floor),
            _ => Err(format!("Unknown goal direction: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-set period threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalTarget {
    /// Non-negative threshold amount
    pub target: Decimal,
    pub direction: GoalDirection,
}

impl GoalTarget {
    pub fn new(target: Decimal, direction: GoalDirection) -> Self {
        Self { target, direction }
    }
}

/// One grouping key with its summed measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: Decimal,
}

/// Summed measure for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Aggregates over a filtered record set.
///
/// Recomputed in full on every filter or goal change; never persisted.
/// Retail revenue lands in `total_income` and `total_expense` stays zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub schema: SchemaKind,
    /// Sum of positive amounts (finance) or all revenue (retail)
    pub total_income: Decimal,
    /// Sum of negative amounts, kept signed; zero under retail
    pub total_expense: Decimal,
    /// `total_income + total_expense` (expense already signed negative)
    pub net_balance: Decimal,
    /// Summed unit counts; row count under finance
    pub total_units: i64,
    /// Up to 10 groups, descending by summed measure
    pub top_groups: Vec<GroupTotal>,
    /// Per-date summed amount for dated records, ascending by date
    pub cash_flow: Vec<DayTotal>,
}

/// Outcome of comparing a summary against a goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    /// `relevant_total - target`, signed
    pub delta: Decimal,
    pub met: bool,
    /// Fraction of the target consumed, clamped to [0, 1].
    /// A zero target is defined as fully used.
    pub percent_used: Decimal,
}

/// Result of loading a source: parsed records plus the count of malformed
/// rows that were skipped rather than aborting the load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<TransactionRecord>,
    pub skipped_rows: usize,
}
