//! Host engine executor
//!
//! Consumes logical plans and produces columnar batches.
//!
//! # Execution flow
//!
//! 1. Dataset scan: the external dataset materializes its rows, applying
//!    any pushed-down native filter under its own null rules
//! 2. Host filters: three-valued logic, rows kept only when true
//! 3. Select: projection of the requested columns
//!
//! Errors from the external dataset library are propagated unchanged.

mod errors;
mod executor;
mod filters;

pub use errors::{ExecutorError, ExecutorResult};
pub use executor::PlanExecutor;
pub use filters::PredicateFilter;
