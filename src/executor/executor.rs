//! Plan executor
//!
//! Materializes a logical plan bottom-up:
//!
//! 1. The dataset scan asks the external dataset for its rows, handing over
//!    any pushed-down native filter and, for a select directly on the scan,
//!    the projection
//! 2. Host filters evaluate with three-valued logic
//! 3. Selects project the surviving columns
//!
//! Dataset errors are returned as they came.

use crate::dataset::Batch;
use crate::planner::LogicalPlan;

use super::errors::{ExecutorError, ExecutorResult};
use super::filters::PredicateFilter;

pub struct PlanExecutor;

impl PlanExecutor {
    pub fn execute(plan: &LogicalPlan) -> ExecutorResult<Batch> {
        match plan {
            LogicalPlan::DatasetScan(node) => Ok(node
                .dataset()
                .to_batch(node.native_filter(), None)?),
            LogicalPlan::Select { input, columns } => {
                if let LogicalPlan::DatasetScan(node) = input.as_ref() {
                    return Ok(node
                        .dataset()
                        .to_batch(node.native_filter(), Some(columns.as_slice()))?);
                }
                let batch = Self::execute(input)?;
                if let Some(missing) = columns.iter().find(|c| batch.column(c).is_none()) {
                    return Err(ExecutorError::ColumnNotFound(missing.clone()));
                }
                Ok(batch.project(columns)?)
            }
            LogicalPlan::Filter { input, predicate } => {
                let batch = Self::execute(input)?;
                let mask = PredicateFilter::mask(&batch, predicate)?;
                Ok(batch.filter_rows(&mask))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{
        DataType, DatasetError, DatasetReference, Field, MemoryDataset, NativeExpr, Schema,
    };
    use crate::planner::{col, DatasetScanNode, ScanOptions};
    use serde_json::json;

    fn scan() -> LogicalPlan {
        let dataset = MemoryDataset::new(Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("bools", DataType::Boolean),
        ]))
        .with_rows(vec![
            json!({"id": 1, "bools": true}),
            json!({"id": 2, "bools": null}),
            json!({"id": 3, "bools": false}),
        ])
        .unwrap();
        DatasetScanNode::try_new(&DatasetReference::from_dataset(dataset), ScanOptions::default())
            .unwrap()
            .into()
    }

    #[test]
    fn test_scan_materializes_everything() {
        let batch = PlanExecutor::execute(&scan()).unwrap();
        assert_eq!(batch.height(), 3);
        assert_eq!(batch.column_names(), vec!["id", "bools"]);
    }

    #[test]
    fn test_host_filter_then_select() {
        let plan = LogicalPlan::Select {
            input: Box::new(LogicalPlan::Filter {
                input: Box::new(scan()),
                predicate: !col("bools"),
            }),
            columns: vec!["id".into()],
        };
        let batch = PlanExecutor::execute(&plan).unwrap();
        assert_eq!(batch.column_names(), vec!["id"]);
        assert_eq!(batch.height(), 1);
        assert_eq!(batch.value("id", 0), Some(&json!(3)));
    }

    #[test]
    fn test_pushed_filter_uses_native_semantics() {
        let node = scan().scan_node().clone();
        let pushed = node.with_pushed_filter(
            !col("bools"),
            NativeExpr::Invert(Box::new(NativeExpr::Field("bools".into()))),
        );
        let batch = PlanExecutor::execute(&LogicalPlan::DatasetScan(pushed)).unwrap();
        // null row survives natively
        assert_eq!(batch.height(), 2);
    }

    #[test]
    fn test_select_on_scan_is_projected_by_dataset() {
        let plan = LogicalPlan::Select {
            input: Box::new(scan()),
            columns: vec!["missing".into()],
        };
        let err = PlanExecutor::execute(&plan).unwrap_err();
        assert_eq!(
            err,
            ExecutorError::Dataset(DatasetError::ColumnNotFound("missing".into()))
        );
    }

    #[test]
    fn test_select_after_filter_checks_columns() {
        let plan = LogicalPlan::Select {
            input: Box::new(LogicalPlan::Filter {
                input: Box::new(scan()),
                predicate: col("bools"),
            }),
            columns: vec!["missing".into()],
        };
        let err = PlanExecutor::execute(&plan).unwrap_err();
        assert_eq!(err, ExecutorError::ColumnNotFound("missing".into()));
    }

    #[test]
    fn test_empty_select_keeps_row_count() {
        let plan = LogicalPlan::Select {
            input: Box::new(LogicalPlan::Filter {
                input: Box::new(scan()),
                predicate: col("id").gt(1i64),
            }),
            columns: vec![],
        };
        let batch = PlanExecutor::execute(&plan).unwrap();
        assert!(batch.column_names().is_empty());
        assert_eq!(batch.height(), 2);

        let plan = LogicalPlan::Select {
            input: Box::new(scan()),
            columns: vec![],
        };
        assert_eq!(PlanExecutor::execute(&plan).unwrap().height(), 3);
    }
}
