//! Lazy frames
//!
//! A `LazyFrame` is a plan under construction. Builder methods return new
//! frames; nothing runs until `collect`.

use crate::dataset::Batch;
use crate::executor::{ExecutorResult, PlanExecutor};
use crate::observability::{log_event_with_fields, Event};
use crate::planner::{
    DatasetScanNode, ExplainPlan, Expr, LogicalPlan, OptimizerConfig, PredicatePushdown,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LazyFrame {
    plan: LogicalPlan,
}

impl LazyFrame {
    pub fn logical_plan(&self) -> &LogicalPlan {
        &self.plan
    }

    /// The dataset scan this frame reads from
    pub fn scan_node(&self) -> &DatasetScanNode {
        self.plan.scan_node()
    }

    /// Keeps rows for which `predicate` is true. A `&str` names a boolean column.
    pub fn filter(self, predicate: impl Into<Expr>) -> LazyFrame {
        LazyFrame {
            plan: LogicalPlan::Filter {
                input: Box::new(self.plan),
                predicate: predicate.into(),
            },
        }
    }

    pub fn select<I, S>(self, columns: I) -> LazyFrame
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LazyFrame {
            plan: LogicalPlan::Select {
                input: Box::new(self.plan),
                columns: columns.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn optimize(&self, config: &OptimizerConfig) -> LogicalPlan {
        PredicatePushdown::new(*config).optimize(&self.plan)
    }

    pub fn explain(&self, config: &OptimizerConfig) -> ExplainPlan {
        ExplainPlan::from_plan(&self.optimize(config))
    }

    /// Optimizes with the default config and executes
    pub fn collect(&self) -> ExecutorResult<Batch> {
        self.collect_with(&OptimizerConfig::default())
    }

    pub fn collect_with(&self, config: &OptimizerConfig) -> ExecutorResult<Batch> {
        let plan = self.optimize(config);
        let dataset = plan.scan_node().source().identity().unwrap_or("null").to_string();
        if config.trace {
            log_event_with_fields(Event::CollectBegin, &[("dataset", dataset.as_str())]);
        }

        let result = PlanExecutor::execute(&plan);

        if config.trace {
            match &result {
                Ok(batch) => log_event_with_fields(
                    Event::CollectComplete,
                    &[
                        ("dataset", dataset.as_str()),
                        ("rows", batch.height().to_string().as_str()),
                    ],
                ),
                Err(e) => log_event_with_fields(
                    Event::CollectFailed,
                    &[
                        ("dataset", dataset.as_str()),
                        ("error", e.to_string().as_str()),
                    ],
                ),
            }
        }
        result
    }
}

impl From<LogicalPlan> for LazyFrame {
    fn from(plan: LogicalPlan) -> Self {
        Self { plan }
    }
}
