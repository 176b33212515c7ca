//! Logical plan nodes
//!
//! A plan is an immutable tree of `LogicalPlan` values. The dataset scan is
//! one variant among the host engine's plan nodes; rewriting a plan always
//! builds new nodes.

use std::sync::Arc;

use crate::dataset::{DatasetReference, ExternalDataset, NativeExpr};

use super::errors::{PlannerError, PlannerResult};
use super::expr::Expr;
use super::options::ScanOptions;

/// Scan of an external dataset.
///
/// Holds a shared reference to the dataset and the scan options exactly as
/// given. After pushdown it also carries the predicate it absorbed, both in
/// host form and in the dataset's native form.
#[derive(Debug, Clone)]
pub struct DatasetScanNode {
    source: DatasetReference,
    dataset: Arc<dyn ExternalDataset>,
    options: ScanOptions,
    pushed: Option<PushedFilter>,
}

#[derive(Debug, Clone, PartialEq)]
struct PushedFilter {
    predicate: Expr,
    native: NativeExpr,
}

impl DatasetScanNode {
    /// Validates the handle structurally and captures it with `options`.
    ///
    /// Does not touch the dataset's schema, fragments or data.
    pub fn try_new(source: &DatasetReference, options: ScanOptions) -> PlannerResult<Self> {
        let dataset = source
            .check_well_formed()
            .map_err(PlannerError::invalid_source)?
            .clone();
        Ok(Self {
            source: source.clone(),
            dataset,
            options,
            pushed: None,
        })
    }

    pub fn source(&self) -> &DatasetReference {
        &self.source
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn allow_pushdown_filter(&self) -> bool {
        self.options.allow_pushdown_filter
    }

    /// Host predicate absorbed by pushdown, if any
    pub fn pushed_predicate(&self) -> Option<&Expr> {
        self.pushed.as_ref().map(|p| &p.predicate)
    }

    /// Native filter handed to the dataset at execution, if any
    pub fn native_filter(&self) -> Option<&NativeExpr> {
        self.pushed.as_ref().map(|p| &p.native)
    }

    pub(crate) fn dataset(&self) -> &Arc<dyn ExternalDataset> {
        &self.dataset
    }

    /// New node with `predicate` evaluated by the dataset as `native`
    pub(crate) fn with_pushed_filter(&self, predicate: Expr, native: NativeExpr) -> Self {
        Self {
            source: self.source.clone(),
            dataset: Arc::clone(&self.dataset),
            options: self.options,
            pushed: Some(PushedFilter { predicate, native }),
        }
    }
}

impl PartialEq for DatasetScanNode {
    fn eq(&self, other: &Self) -> bool {
        // `dataset` is the validated view of `source`
        self.source == other.source && self.options == other.options && self.pushed == other.pushed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogicalPlan {
    DatasetScan(DatasetScanNode),
    Filter {
        input: Box<LogicalPlan>,
        predicate: Expr,
    },
    Select {
        input: Box<LogicalPlan>,
        columns: Vec<String>,
    },
}

impl LogicalPlan {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalPlan::DatasetScan(_) => "DATASET SCAN",
            LogicalPlan::Filter { .. } => "FILTER",
            LogicalPlan::Select { .. } => "SELECT",
        }
    }

    /// The input of this node, if it has one
    pub fn input(&self) -> Option<&LogicalPlan> {
        match self {
            LogicalPlan::DatasetScan(_) => None,
            LogicalPlan::Filter { input, .. } | LogicalPlan::Select { input, .. } => {
                Some(input.as_ref())
            }
        }
    }

    /// The dataset scan at the leaf of this plan
    pub fn scan_node(&self) -> &DatasetScanNode {
        match self {
            LogicalPlan::DatasetScan(node) => node,
            LogicalPlan::Filter { input, .. } | LogicalPlan::Select { input, .. } => {
                input.scan_node()
            }
        }
    }
}

impl From<DatasetScanNode> for LogicalPlan {
    fn from(node: DatasetScanNode) -> Self {
        LogicalPlan::DatasetScan(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataType, Field, HandleDefect, MemoryDataset, Schema};
    use crate::planner::expr::col;

    fn reference() -> DatasetReference {
        DatasetReference::from_dataset(
            MemoryDataset::new(Schema::new(vec![Field::new("bools", DataType::Boolean)]))
                .with_name("flags"),
        )
    }

    #[test]
    fn test_node_captures_arguments() {
        let d = reference();
        let node = DatasetScanNode::try_new(&d, ScanOptions::new().with_allow_pushdown_filter(false))
            .unwrap();
        assert_eq!(node.source(), &d);
        assert!(!node.allow_pushdown_filter());
        assert!(node.pushed_predicate().is_none());
    }

    #[test]
    fn test_null_source_rejected() {
        let err = DatasetScanNode::try_new(&DatasetReference::null(), ScanOptions::default())
            .unwrap_err();
        assert!(err.is_invalid_source());
        assert_eq!(err.defect(), Some(HandleDefect::Null));
    }

    #[test]
    fn test_pushed_filter_builds_new_node() {
        let node = DatasetScanNode::try_new(&reference(), ScanOptions::default()).unwrap();
        let pushed = node.with_pushed_filter(col("bools"), NativeExpr::Field("bools".into()));
        assert_ne!(node, pushed);
        assert!(node.pushed_predicate().is_none());
        assert_eq!(pushed.pushed_predicate(), Some(&col("bools")));
        assert_eq!(pushed.source(), node.source());
    }

    #[test]
    fn test_scan_node_found_through_inputs() {
        let d = reference();
        let plan = LogicalPlan::Select {
            input: Box::new(LogicalPlan::Filter {
                input: Box::new(DatasetScanNode::try_new(&d, ScanOptions::default()).unwrap().into()),
                predicate: col("bools"),
            }),
            columns: vec!["bools".into()],
        };
        assert_eq!(plan.scan_node().source(), &d);
        assert_eq!(plan.input().map(LogicalPlan::name), Some("FILTER"));
    }
}
