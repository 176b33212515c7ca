//! Executor error types
//!
//! Host-side evaluation failures have their own variants. Failures of the
//! external dataset library pass through untouched in `Dataset`.

use thiserror::Error;

use crate::dataset::DatasetError;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutorError {
    /// Raised by the external dataset library
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Host expression referenced an unknown column
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Filter predicate evaluated to something other than a boolean or null
    #[error("Predicate {predicate} produced non-boolean value {value}")]
    PredicateNotBoolean { predicate: String, value: String },

    /// Two values of different types were compared
    #[error("Cannot compare {left} with {right}")]
    IncomparableValues { left: String, right: String },
}

impl ExecutorError {
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::Dataset(_) => "DATASET_ERROR",
            ExecutorError::ColumnNotFound(_) => "EXEC_COLUMN_NOT_FOUND",
            ExecutorError::PredicateNotBoolean { .. } => "EXEC_PREDICATE_NOT_BOOLEAN",
            ExecutorError::IncomparableValues { .. } => "EXEC_INCOMPARABLE_VALUES",
        }
    }

    /// Returns the dataset library's error when that is where it came from
    pub fn as_dataset_error(&self) -> Option<&DatasetError> {
        match self {
            ExecutorError::Dataset(e) => Some(e),
            _ => None,
        }
    }
}
