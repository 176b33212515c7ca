//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits non-zero.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::executor::ExecutorError;
use crate::planner::PlannerError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Planner(#[from] PlannerError),

    #[error("{0}")]
    Executor(#[from] ExecutorError),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Io(String),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "SCANBRIDGE_CLI_CONFIG_ERROR",
            Self::Dataset(_) => "SCANBRIDGE_CLI_DATASET_ERROR",
            Self::Planner(e) => e.code().code(),
            Self::Executor(e) => e.code(),
            Self::Usage(_) => "SCANBRIDGE_CLI_USAGE_ERROR",
            Self::Io(_) => "SCANBRIDGE_CLI_IO_ERROR",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Io(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
