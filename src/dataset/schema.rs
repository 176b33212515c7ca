//! Schema, partitioning and fragment descriptions
//!
//! These are what the external library reports about a dataset. The bridge
//! itself never asks for them; only the executor and tooling do.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column data types known to the external library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Int64,
    Float64,
    Utf8,
    /// Calendar date encoded as `YYYY-MM-DD`
    Date,
}

impl DataType {
    /// Name as written in dataset definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Utf8 => "utf8",
            DataType::Date => "date",
        }
    }

    /// Returns true if a non-null value has the shape of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (DataType::Boolean, Value::Bool(_)) => true,
            (DataType::Int64, Value::Number(n)) => n.is_i64(),
            (DataType::Float64, Value::Number(_)) => true,
            (DataType::Utf8, Value::String(_)) => true,
            (DataType::Date, Value::String(s)) => is_iso_date(s),
            _ => false,
        }
    }
}

fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

fn default_nullable() -> bool {
    true
}

/// A single column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Ordered list of fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// Hive-style partitioning: partition column values live in fragment
/// metadata rather than in the rows themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partitioning {
    pub columns: Vec<String>,
}

impl Partitioning {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Metadata for one fragment of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentInfo {
    pub id: usize,
    pub row_count: usize,
    /// Partition column values shared by every row of the fragment
    pub partition: Map<String, Value>,
}
