//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required column is absent from the source header row.
    ///
    /// The message lists the columns actually found so a user can spot a
    /// renamed or misspelled header without opening the file.
    #[error("Required column '{column}' not found; columns present: {}", .found.join(", "))]
    Schema { column: String, found: Vec<String> },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema mapping file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
