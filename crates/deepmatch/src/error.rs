//! Error types for the deepmatch crate.
//!
//! Comparisons themselves never fail. These errors come from building
//! values (pattern flags, pattern sources, JSON input) and from parsing
//! configuration.

use thiserror::Error;

/// Errors that can occur when building values or reading options.
#[derive(Debug, Error)]
pub enum DeepMatchError {
    /// Pattern source does not compile.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pattern flag outside the supported set.
    #[error("invalid pattern flag '{flag}'")]
    InvalidPatternFlag { flag: char },

    /// Pattern flag given more than once.
    #[error("duplicate pattern flag '{flag}'")]
    DuplicatePatternFlag { flag: char },

    /// Unrecognized comparison semantics name.
    #[error("unknown semantics '{0}', expected one of: equal, contains-all, contains-some")]
    UnknownSemantics(String),

    /// Unrecognized record keying name.
    #[error("unknown record keying '{0}', expected one of: positional, named")]
    UnknownRecordKeying(String),
}

/// Result type for deepmatch operations.
pub type Result<T> = std::result::Result<T, DeepMatchError>;
