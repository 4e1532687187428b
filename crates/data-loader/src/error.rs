//! Error types for the data-loader crate.
//!
//! Ingestion is fail-fast: a single malformed record aborts the run, because
//! a partially loaded dataset would silently skew every similarity computed
//! from it.

use thiserror::Error;

/// Errors that can occur while loading and indexing rating data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading a data file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    ///
    /// Stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} at line {line} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// The user and movie indices disagree about a rating
    #[error("Inconsistent index: user {user}, movie {movie}")]
    InconsistentIndex { user: u32, movie: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
