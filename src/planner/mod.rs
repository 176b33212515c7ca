//! Lazy query planner
//!
//! Builds immutable logical plans over external dataset scans and rewrites
//! them before execution.
//!
//! # Design Principles
//!
//! - Construction is pure: no I/O, no schema access, no logging
//! - Nodes are immutable; every rewrite produces new nodes
//! - A scan carries its pushdown flag verbatim; whether a filter actually
//!   moves into the dataset is decided by the optimizer
//!
//! # Pushdown and nulls
//!
//! A pushed-down filter is evaluated by the external dataset with its own
//! null semantics, which may differ from the host's three-valued logic.
//! Scans built with `allow_pushdown_filter = false` always materialize in
//! full and filter in the host.

mod errors;
mod explain;
mod expr;
mod options;
mod plan;
mod pushdown;

pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::{ExplainLine, ExplainPlan};
pub use expr::{col, lit, CompareOp, Expr};
pub use options::ScanOptions;
pub use plan::{DatasetScanNode, LogicalPlan};
pub use pushdown::{translate, OptimizerConfig, PredicatePushdown};
