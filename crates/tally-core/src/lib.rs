//! Tally Core Library
//!
//! Shared functionality for the Tally transaction summarizer:
//! - Configurable CSV schema mappings (finance and retail families)
//! - CSV loading with recoverable row-level parsing
//! - Grouping-key and free-text filtering
//! - Aggregate summaries (totals, top groups, cash flow)
//! - Goal comparison (budget ceilings and revenue floors)
//! - Load cache keyed by source path and modification time
//!
//! The library is pure data-in/data-out: it never formats currency strings
//! or produces chart objects. A presentation layer consumes [`SummaryResult`]
//! and [`GoalStatus`] as plain values.

pub mod cache;
pub mod error;
pub mod filter;
pub mod goal;
pub mod import;
pub mod models;
pub mod schema;
pub mod summary;

pub use cache::LoadCache;
pub use error::{Error, Result};
pub use filter::filter;
pub use goal::compare_to_goal;
pub use import::{load, load_from_bytes, read_headers};
pub use models::{
    DayTotal, FilterSelection, GoalDirection, GoalStatus, GoalTarget, GroupTotal, LoadOutcome,
    SummaryResult, TransactionRecord,
};
pub use schema::{CsvSchema, SchemaKind, SourceEncoding};
pub use summary::summarize;
