//! Error types for the Podium library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Podium operations.
///
/// The loader converts these into diagnostics at its boundary, so they only
/// reach callers through configuration loading and the lower-level helpers.
#[derive(Debug, Error)]
pub enum PodiumError {
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

    /// An encoding label that `encoding_rs` does not recognise.
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// The bytes are not valid in the attempted encoding.
    #[error("Input is not valid {encoding} (row {row})")]
    Undecodable { encoding: String, row: usize },

    /// Empty file or no usable header.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Podium operations.
pub type Result<T> = std::result::Result<T, PodiumError>;
