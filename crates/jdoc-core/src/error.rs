//! Error types for document parsing and access.

use thiserror::Error;

/// Every failure the access layer can report.
///
/// The four variants are the whole taxonomy: malformed text, a missing object
/// member, an out-of-range array position, and a node whose variant does not
/// fit the requested operation or extraction type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// The input text was not well-formed JSON (or not a well-formed path).
    /// Line and column are 1-based.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// An object lookup named a key that is not present.
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    /// An array lookup used a position at or past the end.
    #[error("index {index} is out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The node's variant cannot serve the requested operation or type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl DocError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        DocError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn key_not_found(key: &str) -> Self {
        DocError::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// True for the "not there" errors (`KeyNotFound`, `IndexOutOfRange`),
    /// which lenient callers usually treat as an absent optional field.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            DocError::KeyNotFound { .. } | DocError::IndexOutOfRange { .. }
        )
    }
}

/// Convenience alias used throughout jdoc-core.
pub type Result<T> = std::result::Result<T, DocError>;
