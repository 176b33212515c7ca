//! Predicate evaluation in the host engine
//!
//! Three-valued logic: a comparison involving null is unknown (null), `not`
//! of unknown is unknown, and `and`/`or` follow Kleene's tables. A row
//! passes a filter only when the predicate is exactly true.

use std::cmp::Ordering;

use serde_json::Value;

use crate::dataset::Batch;
use crate::planner::{CompareOp, Expr};

use super::errors::{ExecutorError, ExecutorResult};

pub struct PredicateFilter;

impl PredicateFilter {
    /// Computes the keep-mask of `predicate` over every row of `batch`
    pub fn mask(batch: &Batch, predicate: &Expr) -> ExecutorResult<Vec<bool>> {
        if let Some(missing) = predicate
            .columns()
            .into_iter()
            .find(|c| batch.column(c).is_none())
        {
            return Err(ExecutorError::ColumnNotFound(missing.to_string()));
        }

        (0..batch.height())
            .map(|row| {
                let value = Self::evaluate(batch, row, predicate)?;
                Ok(Self::truth(value, predicate)? == Some(true))
            })
            .collect()
    }

    /// Evaluates `expr` against one row
    pub fn evaluate(batch: &Batch, row: usize, expr: &Expr) -> ExecutorResult<Value> {
        match expr {
            Expr::Column(name) => batch
                .value(name, row)
                .cloned()
                .ok_or_else(|| ExecutorError::ColumnNotFound(name.clone())),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Compare { op, left, right } => {
                let l = Self::evaluate(batch, row, left)?;
                let r = Self::evaluate(batch, row, right)?;
                if l.is_null() || r.is_null() {
                    return Ok(Value::Null);
                }
                let ord = compare(&l, &r)?;
                let result = match op {
                    CompareOp::Eq => ord == Ordering::Equal,
                    CompareOp::NotEq => ord != Ordering::Equal,
                    CompareOp::Lt => ord == Ordering::Less,
                    CompareOp::LtEq => ord != Ordering::Greater,
                    CompareOp::Gt => ord == Ordering::Greater,
                    CompareOp::GtEq => ord != Ordering::Less,
                };
                Ok(Value::Bool(result))
            }
            Expr::Not(e) => {
                let inner = Self::truth(Self::evaluate(batch, row, e)?, e)?;
                Ok(to_value(inner.map(|b| !b)))
            }
            Expr::And(l, r) => {
                let a = Self::truth(Self::evaluate(batch, row, l)?, l)?;
                let b = Self::truth(Self::evaluate(batch, row, r)?, r)?;
                Ok(to_value(kleene_and(a, b)))
            }
            Expr::Or(l, r) => {
                let a = Self::truth(Self::evaluate(batch, row, l)?, l)?;
                let b = Self::truth(Self::evaluate(batch, row, r)?, r)?;
                Ok(to_value(kleene_or(a, b)))
            }
            Expr::IsNull(e) => Ok(Value::Bool(Self::evaluate(batch, row, e)?.is_null())),
            Expr::IsNotNull(e) => Ok(Value::Bool(!Self::evaluate(batch, row, e)?.is_null())),
        }
    }

    /// Boolean, unknown, or an error for anything else
    fn truth(value: Value, expr: &Expr) -> ExecutorResult<Option<bool>> {
        match value {
            Value::Bool(b) => Ok(Some(b)),
            Value::Null => Ok(None),
            other => Err(ExecutorError::PredicateNotBoolean {
                predicate: expr.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

fn to_value(truth: Option<bool>) -> Value {
    truth.map(Value::Bool).unwrap_or(Value::Null)
}

fn kleene_and(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

fn kleene_or(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

/// Ordering of two non-null values; no coercion between types
fn compare(left: &Value, right: &Value) -> ExecutorResult<Ordering> {
    let ord = match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                Some(ai.cmp(&bi))
            } else {
                a.as_f64()
                    .zip(b.as_f64())
                    .and_then(|(af, bf)| af.partial_cmp(&bf))
            }
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };
    ord.ok_or_else(|| ExecutorError::IncomparableValues {
        left: left.to_string(),
        right: right.to_string(),
    })
}
