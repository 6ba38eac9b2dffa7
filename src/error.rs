//! Error types for the review insights pipeline

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (unreadable input, unwritable artifact)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading/writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from an artifact
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A managed column holds a value that cannot be parsed
    #[error("Invalid value {value:?} in column {column} (row {row})")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// Aggregation was requested over zero records
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Schema errors are caused by the shape of an artifact rather than by IO
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::MissingColumn(_) | Error::InvalidValue { .. })
    }

    pub(crate) fn invalid_value(column: &str, row: usize, value: &str) -> Self {
        Error::InvalidValue {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }
    }
}
