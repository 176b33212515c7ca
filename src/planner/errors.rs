//! Planner error types
//!
//! Error codes:
//! - SCAN_INVALID_SOURCE (REJECT)
//!
//! Plan construction can fail in exactly one way: the scan source handle is
//! null or structurally malformed. Everything else is deferred to execution.

use std::fmt;

use crate::dataset::HandleDefect;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Scan source is null or malformed
    InvalidSource,
}

impl PlannerErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::InvalidSource => "SCAN_INVALID_SOURCE",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }

    /// Planner errors are reported at call time and never retried
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    defect: Option<HandleDefect>,
}

impl PlannerError {
    /// Create an invalid source error from a handle defect
    pub fn invalid_source(defect: HandleDefect) -> Self {
        Self {
            code: PlannerErrorCode::InvalidSource,
            message: format!("Invalid scan source: {}", defect.describe()),
            defect: Some(defect),
        }
    }

    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// The handle defect behind an invalid source error
    pub fn defect(&self) -> Option<HandleDefect> {
        self.defect
    }

    pub fn is_invalid_source(&self) -> bool {
        self.code == PlannerErrorCode::InvalidSource
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
