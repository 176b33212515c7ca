//! Dataset reference adapter
//!
//! Wraps handles to externally-managed columnar datasets so the planner can
//! use them as scan sources without copying or interpreting their contents.
//!
//! The external library contract is the `ExternalDataset` trait: schema
//! introspection, fragment enumeration and native filter evaluation. The
//! planner only ever looks at a handle's identity; everything else is
//! deferred to execution.

mod batch;
mod errors;
pub mod memory;
mod native;
mod reference;
mod schema;

pub use batch::{Batch, Column};
pub use errors::{DatasetError, DatasetResult};
pub use memory::{MemoryDataset, MemoryFragment};
pub use native::{NativeCompareOp, NativeExpr};
pub use reference::{DatasetReference, ExternalDataset, HandleDefect};
pub use schema::{DataType, Field, FragmentInfo, Partitioning, Schema};
