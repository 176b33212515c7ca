//! Predicate pushdown into dataset scans
//!
//! A filter sitting directly on a dataset scan moves into the scan when all
//! of the following hold:
//!
//! 1. Predicate pushdown is enabled in the optimizer config
//! 2. The scan was built with `allow_pushdown_filter`
//! 3. The predicate has a native form
//!
//! Stacked filters are absorbed one after another and combined with AND.
//! Anything else is left to the host engine.

use serde::{Deserialize, Serialize};

use crate::dataset::{NativeCompareOp, NativeExpr};
use crate::observability::{log_event_with_fields, Event};

use super::expr::{CompareOp, Expr};
use super::plan::{DatasetScanNode, LogicalPlan};

fn default_predicate_pushdown() -> bool {
    true
}

/// Host optimizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Global switch; when off no scan receives a predicate
    #[serde(default = "default_predicate_pushdown")]
    pub predicate_pushdown: bool,
    /// Log pushdown decisions and collection steps at TRACE
    #[serde(default)]
    pub trace: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            predicate_pushdown: default_predicate_pushdown(),
            trace: false,
        }
    }
}

impl OptimizerConfig {
    pub fn without_predicate_pushdown() -> Self {
        Self {
            predicate_pushdown: false,
            ..Self::default()
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Translates a host predicate into the dataset's filter language.
///
/// Returns `None` when some part has no native counterpart; only scalar
/// literals translate.
pub fn translate(expr: &Expr) -> Option<NativeExpr> {
    let native = match expr {
        Expr::Column(name) => NativeExpr::Field(name.clone()),
        Expr::Literal(value) => {
            if value.is_array() || value.is_object() {
                return None;
            }
            NativeExpr::Scalar(value.clone())
        }
        Expr::Compare { op, left, right } => NativeExpr::Compare {
            op: match op {
                CompareOp::Eq => NativeCompareOp::Equal,
                CompareOp::NotEq => NativeCompareOp::NotEqual,
                CompareOp::Lt => NativeCompareOp::Less,
                CompareOp::LtEq => NativeCompareOp::LessEqual,
                CompareOp::Gt => NativeCompareOp::Greater,
                CompareOp::GtEq => NativeCompareOp::GreaterEqual,
            },
            left: Box::new(translate(left)?),
            right: Box::new(translate(right)?),
        },
        Expr::Not(e) => NativeExpr::Invert(Box::new(translate(e)?)),
        Expr::And(l, r) => NativeExpr::And(Box::new(translate(l)?), Box::new(translate(r)?)),
        Expr::Or(l, r) => NativeExpr::Or(Box::new(translate(l)?), Box::new(translate(r)?)),
        Expr::IsNull(e) => NativeExpr::IsNull(Box::new(translate(e)?)),
        Expr::IsNotNull(e) => NativeExpr::IsValid(Box::new(translate(e)?)),
    };
    Some(native)
}

pub struct PredicatePushdown {
    config: OptimizerConfig,
}

impl PredicatePushdown {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Returns the rewritten plan; the input plan is left untouched
    pub fn optimize(&self, plan: &LogicalPlan) -> LogicalPlan {
        match plan {
            LogicalPlan::DatasetScan(node) => LogicalPlan::DatasetScan(node.clone()),
            LogicalPlan::Filter { input, predicate } => match self.optimize(input) {
                LogicalPlan::DatasetScan(node) => self.push_into_scan(node, predicate),
                other => LogicalPlan::Filter {
                    input: Box::new(other),
                    predicate: predicate.clone(),
                },
            },
            LogicalPlan::Select { input, columns } => LogicalPlan::Select {
                input: Box::new(self.optimize(input)),
                columns: columns.clone(),
            },
        }
    }

    fn push_into_scan(&self, node: DatasetScanNode, predicate: &Expr) -> LogicalPlan {
        if !self.config.predicate_pushdown {
            return self.decline(node, predicate, "predicate pushdown disabled");
        }
        if !node.allow_pushdown_filter() {
            return self.decline(node, predicate, "scan does not allow pushdown");
        }

        let combined = match node.pushed_predicate() {
            Some(existing) => existing.clone().and(predicate.clone()),
            None => predicate.clone(),
        };
        let native = match translate(&combined) {
            Some(native) => native,
            None => return self.decline(node, predicate, "predicate has no native form"),
        };

        if self.config.trace {
            log_event_with_fields(
                Event::PushdownApplied,
                &[
                    ("dataset", node.dataset().identity()),
                    ("predicate", combined.to_string().as_str()),
                    ("native", native.to_string().as_str()),
                ],
            );
        }
        LogicalPlan::DatasetScan(node.with_pushed_filter(combined, native))
    }

    fn decline(&self, node: DatasetScanNode, predicate: &Expr, reason: &str) -> LogicalPlan {
        if self.config.trace {
            log_event_with_fields(
                Event::PushdownDeclined,
                &[
                    ("dataset", node.dataset().identity()),
                    ("predicate", predicate.to_string().as_str()),
                    ("reason", reason),
                ],
            );
        }
        LogicalPlan::Filter {
            input: Box::new(LogicalPlan::DatasetScan(node)),
            predicate: predicate.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataType, DatasetReference, Field, MemoryDataset, Schema};
    use crate::observability::Logger;
    use crate::planner::expr::{col, lit};
    use crate::planner::options::ScanOptions;
    use serde_json::json;

    fn scan(allow: bool) -> LogicalPlan {
        let d = DatasetReference::from_dataset(
            MemoryDataset::new(Schema::new(vec![
                Field::new("bools", DataType::Boolean),
                Field::new("n", DataType::Int64),
            ]))
            .with_name("flags"),
        );
        DatasetScanNode::try_new(&d, ScanOptions::new().with_allow_pushdown_filter(allow))
            .unwrap()
            .into()
    }

    fn filter(input: LogicalPlan, predicate: Expr) -> LogicalPlan {
        LogicalPlan::Filter {
            input: Box::new(input),
            predicate,
        }
    }

    #[test]
    fn test_filter_pushed_when_allowed() {
        let optimized = PredicatePushdown::new(OptimizerConfig::default())
            .optimize(&filter(scan(true), col("bools")));
        match optimized {
            LogicalPlan::DatasetScan(node) => {
                assert_eq!(node.pushed_predicate(), Some(&col("bools")));
                assert_eq!(node.native_filter(), Some(&NativeExpr::Field("bools".into())));
            }
            other => panic!("expected scan, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_kept_when_scan_disallows() {
        let plan = filter(scan(false), col("bools"));
        let optimized = PredicatePushdown::new(OptimizerConfig::default()).optimize(&plan);
        assert_eq!(optimized, plan);
    }

    #[test]
    fn test_filter_kept_when_optimizer_disabled() {
        let plan = filter(scan(true), col("bools"));
        let optimized =
            PredicatePushdown::new(OptimizerConfig::without_predicate_pushdown()).optimize(&plan);
        assert_eq!(optimized, plan);
    }

    #[test]
    fn test_stacked_filters_combined() {
        let plan = filter(filter(scan(true), col("bools")), col("n").gt(3i64));
        let optimized = PredicatePushdown::new(OptimizerConfig::default()).optimize(&plan);
        assert_eq!(
            optimized.scan_node().pushed_predicate(),
            Some(&col("bools").and(col("n").gt(3i64)))
        );
        assert!(matches!(optimized, LogicalPlan::DatasetScan(_)));
    }

    #[test]
    fn test_untranslatable_predicate_stays() {
        let plan = filter(scan(true), col("n").eq(lit(json!([1, 2]))));
        let optimized = PredicatePushdown::new(OptimizerConfig::default()).optimize(&plan);
        assert_eq!(optimized, plan);
    }

    #[test]
    fn test_translate_not_and_null_checks() {
        let native = translate(&(!col("bools")).or(col("n").is_not_null())).unwrap();
        assert_eq!(
            native,
            NativeExpr::Or(
                Box::new(NativeExpr::Invert(Box::new(NativeExpr::Field("bools".into())))),
                Box::new(NativeExpr::IsValid(Box::new(NativeExpr::Field("n".into())))),
            )
        );
    }

    #[test]
    fn test_decisions_traced_only_when_enabled() {
        let plan = filter(scan(true), col("bools"));

        let (_, lines) = Logger::capture(|| {
            PredicatePushdown::new(OptimizerConfig::default()).optimize(&plan)
        });
        assert!(lines.is_empty());

        let config = OptimizerConfig::default().with_trace(true);
        let (_, lines) = Logger::capture(|| PredicatePushdown::new(config).optimize(&plan));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("PUSHDOWN_APPLIED"));
        assert!(lines[0].contains("flags"));
    }
}
