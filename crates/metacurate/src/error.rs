//! Error types for the metacurate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metacurate operations.
///
/// The curation engine itself never fails; every variant here originates in
/// the I/O layer that feeds it.
#[derive(Debug, Error)]
pub enum CurationError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A directive table lacks a required column.
    #[error("Missing column '{column}' in '{file}'")]
    MissingColumn { file: String, column: String },

    /// A directive row cannot be decoded.
    #[error("Malformed directive at row {row}: {message}")]
    MalformedDirective { row: usize, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error saving or loading a model.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for metacurate operations.
pub type Result<T> = std::result::Result<T, CurationError>;
