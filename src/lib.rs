//! scanbridge - lazy scans over external datasets
//!
//! Wraps a handle to an externally owned dataset into a lazy plan node of
//! the host engine, with optional predicate pushdown into the dataset.
//!
//! ```ignore
//! use scanbridge::{col, scan_dataset, DatasetReference, MemoryDataset, ScanOptions};
//!
//! let frame = scan_dataset(&DatasetReference::from_dataset(dataset), ScanOptions::default())?
//!     .filter(col("bools"));
//! let batch = frame.collect()?;
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod executor;
pub mod frame;
pub mod observability;
pub mod planner;
pub mod scan;

pub use config::{BridgeConfig, ConfigError};
pub use dataset::{Batch, DatasetError, DatasetReference, ExternalDataset, MemoryDataset};
pub use executor::ExecutorError;
pub use frame::LazyFrame;
pub use planner::{
    col, lit, DatasetScanNode, Expr, LogicalPlan, OptimizerConfig, PlannerError, ScanOptions,
};
#[allow(deprecated)]
pub use scan::scan_ds;
pub use scan::{scan_dataset, LegacyScanArgs};
