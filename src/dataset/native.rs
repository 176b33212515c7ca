//! Native filter expressions of the external dataset library
//!
//! Pushed-down predicates are translated into this form and evaluated by the
//! dataset, under the dataset's own null rules.

use std::fmt;

use serde_json::Value;

/// Comparison operators understood natively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeCompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl NativeCompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            NativeCompareOp::Equal => "==",
            NativeCompareOp::NotEqual => "!=",
            NativeCompareOp::Less => "<",
            NativeCompareOp::LessEqual => "<=",
            NativeCompareOp::Greater => ">",
            NativeCompareOp::GreaterEqual => ">=",
        }
    }
}

/// Filter expression tree in the external library's vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum NativeExpr {
    Field(String),
    Scalar(Value),
    Compare {
        op: NativeCompareOp,
        left: Box<NativeExpr>,
        right: Box<NativeExpr>,
    },
    And(Box<NativeExpr>, Box<NativeExpr>),
    Or(Box<NativeExpr>, Box<NativeExpr>),
    Invert(Box<NativeExpr>),
    IsNull(Box<NativeExpr>),
    IsValid(Box<NativeExpr>),
}

impl NativeExpr {
    /// Field names referenced anywhere in the expression
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            NativeExpr::Field(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            NativeExpr::Scalar(_) => {}
            NativeExpr::Compare { left, right, .. }
            | NativeExpr::And(left, right)
            | NativeExpr::Or(left, right) => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            NativeExpr::Invert(e) | NativeExpr::IsNull(e) | NativeExpr::IsValid(e) => {
                e.collect_fields(out)
            }
        }
    }
}

impl fmt::Display for NativeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeExpr::Field(name) => write!(f, "field({})", name),
            NativeExpr::Scalar(v) => write!(f, "{}", v),
            NativeExpr::Compare { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            NativeExpr::And(l, r) => write!(f, "({} and {})", l, r),
            NativeExpr::Or(l, r) => write!(f, "({} or {})", l, r),
            NativeExpr::Invert(e) => write!(f, "invert({})", e),
            NativeExpr::IsNull(e) => write!(f, "is_null({})", e),
            NativeExpr::IsValid(e) => write!(f, "is_valid({})", e),
        }
    }
}
