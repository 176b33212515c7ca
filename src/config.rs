//! Bridge configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "dataset": "fixtures/flags.json",
//!   "scan": { "allow_pushdown_filter": true },
//!   "optimizer": { "predicate_pushdown": true, "trace": false }
//! }
//! ```
//!
//! A relative `dataset` path is resolved against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::planner::{OptimizerConfig, ScanOptions};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Default dataset definition for the command line
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Options applied to scans built from this config
    #[serde(default)]
    pub scan: ScanOptions,

    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl BridgeConfig {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config = Self::from_json_str(&content)?;
        if let (Some(dataset), Some(base)) = (config.dataset.as_mut(), path.parent()) {
            if dataset.is_relative() {
                *dataset = base.join(&*dataset);
            }
        }

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("path", path.display().to_string().as_str()),
                (
                    "predicate_pushdown",
                    config.optimizer.predicate_pushdown.to_string().as_str(),
                ),
            ],
        );
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: BridgeConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(dataset) = &self.dataset {
            if dataset.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("dataset path must not be empty".into()));
            }
        }
        Ok(())
    }
}
