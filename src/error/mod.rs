//! Error handling for the demography tables.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while loading, filtering or summarising the tables
#[derive(Debug, thiserror::Error)]
pub enum DemographyError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error parsing JSON (configuration or boundaries)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table does not have the expected shape
    #[error("Schema error in {table}: {message}")]
    Schema { table: String, message: String },

    /// A column referenced by a filter or summary is absent
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// A column exists but holds an unexpected type
    #[error("Column '{column}' is not a {expected} array")]
    ColumnType { column: String, expected: String },

    /// A filter was built without one of the dimensions it declared as required
    #[error("Filter is missing a selection for dimension '{0}'")]
    MissingDimension(String),

    /// A key combination that must be unique appears more than once
    #[error("Duplicate key in {table}: {key}")]
    DuplicateKey { table: String, key: String },

    /// A categorical value outside its fixed enumeration
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },

    /// A selection produced no rows where a single value was needed
    #[error("No data for {what} ({selection})")]
    NoData { what: String, selection: String },

    /// Region names in the dataset and the boundary file disagree
    #[error("Geometry join dropped {} of {expected} regions: {}", missing.len(), missing.join(", "))]
    GeometryJoinMismatch { expected: usize, missing: Vec<String> },
}

impl DemographyError {
    /// Create a `NoData` error for a described selection
    pub fn no_data(what: impl Into<String>, selection: impl Into<String>) -> Self {
        Self::NoData {
            what: what.into(),
            selection: selection.into(),
        }
    }

    /// Create a schema error for a named table
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the selection was simply empty
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Result type for demography operations
pub type Result<T> = std::result::Result<T, DemographyError>;
