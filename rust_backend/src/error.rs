//! Error types for the cleaning pipeline.

use polars::prelude::PolarsError;

/// Result type for cleaning operations
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type for cleaning operations
///
/// Values that fail numeric parsing are not errors: the stages coerce them to
/// null and count them in the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum CleaningError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Duplicate column after normalization: {0}")]
    DuplicateColumn(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl CleaningError {
    /// Map a failed column lookup onto `MissingColumn`, keeping every other
    /// polars failure as-is.
    pub(crate) fn from_lookup(column: &str, err: PolarsError) -> Self {
        match err {
            PolarsError::ColumnNotFound(_) => CleaningError::MissingColumn(column.to_string()),
            other => CleaningError::Polars(other),
        }
    }
}
