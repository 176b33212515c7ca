//! Errors raised by the external dataset library
//!
//! These surface from schema introspection, fragment enumeration and native
//! filter evaluation. Callers above the dataset layer pass them through
//! untouched.

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// External dataset errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// Column referenced by a projection or native filter does not exist
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Row in a fragment does not conform to the dataset schema
    #[error("Fragment {fragment}, row {row}: {reason}")]
    RowMismatch {
        fragment: usize,
        row: usize,
        reason: String,
    },

    /// Dataset definition itself is unusable
    #[error("Invalid dataset definition: {0}")]
    InvalidDefinition(String),

    /// Native filter could not be evaluated
    #[error("Invalid native filter: {0}")]
    InvalidFilter(String),

    /// Two values of different types were compared
    #[error("Cannot compare {left} with {right}")]
    IncomparableValues { left: String, right: String },

    /// Underlying storage could not be read
    #[error("Failed to read dataset: {0}")]
    Io(String),
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::InvalidDefinition(format!("JSON error: {}", e))
    }
}
