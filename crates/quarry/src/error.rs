//! Error types for the quarry crate.

use thiserror::Error;

/// Errors that can occur when configuring or running a search.
///
/// Every error is raised before any result is produced: a search either
/// returns its complete match list or fails with exactly one of these.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// The collection (or a sub-collection) has no defined matching behavior.
    #[error("unsupported collection shape: {shape}")]
    UnsupportedShape { shape: &'static str },

    /// Mode name outside of `exact`, `substring`, `regex` and `range`.
    #[error("unsupported match mode: '{0}'")]
    UnsupportedMode(String),

    /// `case_sensitive` and `normalize` were both requested.
    #[error("options 'caseSensitive' and 'normalize' are mutually exclusive")]
    ConflictingOptions,

    /// The mode requires text but an operand is something else.
    #[error("type mismatch in {mode} mode: expected {expected}, got {actual}")]
    TypeMismatch {
        mode: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Regex query that does not compile.
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Options document that could not be read.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;
