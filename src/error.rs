//! Centralized error handling for the quickstats pipeline.
//!
//! Input problems (missing file, empty file, unparsable content) are fatal to
//! the whole run and carry their own variants so callers can match on them.
//! Everything downstream of a successful load degrades instead of failing,
//! so those variants only surface when degradation is impossible.

use std::fmt;

/// Main error type for pipeline operations.
#[derive(Debug)]
pub enum PipelineError {
    /// Input file does not exist.
    NotFound(String),

    /// Input file has zero bytes, or parses to zero rows or zero columns.
    EmptyInput(String),

    /// The CSV collaborator could not tokenize the input at all.
    MalformedInput(String),

    /// I/O errors (file metadata, directory creation, etc.)
    Io(std::io::Error),

    /// Data processing errors (polars operations)
    DataProcessing(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Input file not found: {path}"),
            Self::EmptyInput(msg) => write!(f, "Input file is empty: {msg}"),
            Self::MalformedInput(msg) => write!(f, "Failed to parse input file: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<polars::error::PolarsError> for PipelineError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
