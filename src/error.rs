//! Error types for neuromorph

use std::io;
use thiserror::Error;

/// Main error type for neuromorph operations
///
/// Only load-level failures and bad lookups are errors. Structural defects in
/// otherwise readable data are reported through [`crate::check`] instead.
#[derive(Debug, Error)]
pub enum MorphError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source lacks a required table, or the declared format/stage is unknown
    #[error("Format error: {0}")]
    Format(String),

    /// Malformed data line in a text source
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Requested ID lies outside the valid range `[first, end)`
    #[error("ID {id} out of range [{first}, {end})")]
    Lookup { id: i64, first: i64, end: i64 },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for neuromorph operations
pub type Result<T> = std::result::Result<T, MorphError>;

impl From<String> for MorphError {
    fn from(s: String) -> Self {
        MorphError::Custom(s)
    }
}

impl From<&str> for MorphError {
    fn from(s: &str) -> Self {
        MorphError::Custom(s.to_string())
    }
}
