//! Explain output for lazy plans
//!
//! Deterministic, human-readable rendering of a plan tree, root first.

use std::fmt;

use super::plan::LogicalPlan;

/// One rendered plan node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainLine {
    pub depth: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainPlan {
    pub lines: Vec<ExplainLine>,
}

impl ExplainPlan {
    pub fn from_plan(plan: &LogicalPlan) -> Self {
        let mut lines = Vec::new();
        let mut node = Some(plan);
        let mut depth = 0;
        while let Some(current) = node {
            lines.push(ExplainLine {
                depth,
                text: Self::describe(current),
            });
            node = current.input();
            depth += 1;
        }
        Self { lines }
    }

    fn describe(plan: &LogicalPlan) -> String {
        match plan {
            LogicalPlan::DatasetScan(node) => {
                let identity = node.source().identity().unwrap_or("null");
                let pushdown = if node.allow_pushdown_filter() {
                    "allowed"
                } else {
                    "disallowed"
                };
                let mut text = format!(
                    "{} [{}] pushdown={}",
                    plan.name(),
                    identity,
                    pushdown
                );
                if let Some(native) = node.native_filter() {
                    text.push_str(&format!(" native_filter={}", native));
                }
                text
            }
            LogicalPlan::Filter { predicate, .. } => format!("{} {}", plan.name(), predicate),
            LogicalPlan::Select { columns, .. } => {
                format!("{} [{}]", plan.name(), columns.join(", "))
            }
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        for line in &self.lines {
            writeln!(f, "{}{}", "  ".repeat(line.depth), line.text)?;
        }
        Ok(())
    }
}
