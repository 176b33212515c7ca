//! In-memory external dataset
//!
//! A complete `ExternalDataset` backed by fragments of JSON rows. It is
//! what the CLI loads from disk and what the test suites scan.
//!
//! # Native filter semantics
//!
//! Nulls never propagate. A comparison with a null operand is `false`, a
//! null used directly as a predicate is `false`, and `invert` flips the
//! result as usual. So `invert(field(bools))` keeps rows where `bools` is
//! null, unlike three-valued logic which would drop them.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::batch::{Batch, Column};
use super::errors::{DatasetError, DatasetResult};
use super::native::{NativeCompareOp, NativeExpr};
use super::reference::ExternalDataset;
use super::schema::{Field, FragmentInfo, Partitioning, Schema};

static NULL_VALUE: Value = Value::Null;

/// One fragment: partition values plus the rows stored in it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryFragment {
    #[serde(default)]
    pub partition: Map<String, Value>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

/// On-disk JSON layout
#[derive(Debug, Deserialize)]
struct DatasetDefinition {
    #[serde(default)]
    name: Option<String>,
    schema: Vec<Field>,
    #[serde(default)]
    partitioning: Vec<String>,
    #[serde(default)]
    fragments: Vec<MemoryFragment>,
}

#[derive(Debug, Clone)]
pub struct MemoryDataset {
    identity: String,
    schema: Schema,
    partitioning: Option<Partitioning>,
    fragments: Vec<MemoryFragment>,
}

impl MemoryDataset {
    /// Creates an empty dataset with a generated identity
    pub fn new(schema: Schema) -> Self {
        Self {
            identity: Uuid::new_v4().to_string(),
            schema,
            partitioning: None,
            fragments: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.identity = name.into();
        self
    }

    pub fn with_partitioning(mut self, partitioning: Partitioning) -> DatasetResult<Self> {
        if let Some(missing) = partitioning
            .columns
            .iter()
            .find(|c| self.schema.field(c).is_none())
        {
            return Err(DatasetError::InvalidDefinition(format!(
                "partition column '{}' is not in the schema",
                missing
            )));
        }
        self.partitioning = Some(partitioning);
        Ok(self)
    }

    /// Appends a validated fragment
    pub fn with_fragment(mut self, fragment: MemoryFragment) -> DatasetResult<Self> {
        self.validate_fragment(self.fragments.len(), &fragment)?;
        self.fragments.push(fragment);
        Ok(self)
    }

    /// Appends an unpartitioned fragment built from JSON objects
    pub fn with_rows(self, rows: Vec<Value>) -> DatasetResult<Self> {
        let fragment = self.fragments.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Value::Object(map) => Ok(map),
                other => Err(DatasetError::RowMismatch {
                    fragment,
                    row,
                    reason: format!("expected an object, got {}", other),
                }),
            })
            .collect::<DatasetResult<Vec<_>>>()?;
        self.with_fragment(MemoryFragment {
            partition: Map::new(),
            rows,
        })
    }

    pub fn from_json_str(content: &str) -> DatasetResult<Self> {
        let definition: DatasetDefinition = serde_json::from_str(content)?;
        let mut dataset = MemoryDataset::new(Schema::new(definition.schema));
        if let Some(name) = definition.name {
            dataset = dataset.with_name(name);
        }
        if !definition.partitioning.is_empty() {
            dataset = dataset.with_partitioning(Partitioning::new(definition.partitioning))?;
        }
        definition
            .fragments
            .into_iter()
            .try_fold(dataset, |ds, fragment| ds.with_fragment(fragment))
    }

    pub fn from_json_file(path: &Path) -> DatasetResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn num_rows(&self) -> usize {
        self.fragments.iter().map(|f| f.rows.len()).sum()
    }

    fn is_partition_column(&self, name: &str) -> bool {
        self.partitioning
            .as_ref()
            .map(|p| p.contains(name))
            .unwrap_or(false)
    }

    fn validate_fragment(&self, index: usize, fragment: &MemoryFragment) -> DatasetResult<()> {
        for (key, value) in &fragment.partition {
            if !self.is_partition_column(key) {
                return Err(DatasetError::InvalidDefinition(format!(
                    "fragment {} has a value for non-partition column '{}'",
                    index, key
                )));
            }
            check_cell(self.schema.field(key), key, value).map_err(|reason| {
                DatasetError::InvalidDefinition(format!("fragment {}: {}", index, reason))
            })?;
        }

        for (row_index, row) in fragment.rows.iter().enumerate() {
            let mismatch = |reason: String| DatasetError::RowMismatch {
                fragment: index,
                row: row_index,
                reason,
            };
            for (key, value) in row {
                if self.is_partition_column(key) {
                    return Err(mismatch(format!(
                        "partition column '{}' must not be stored in rows",
                        key
                    )));
                }
                let field = self
                    .schema
                    .field(key)
                    .ok_or_else(|| mismatch(format!("unknown column '{}'", key)))?;
                check_cell(Some(field), key, value).map_err(mismatch)?;
            }
            if let Some(missing) = self.schema.fields.iter().find(|f| {
                !f.nullable && !self.is_partition_column(&f.name) && !row.contains_key(&f.name)
            }) {
                return Err(mismatch(format!(
                    "non-nullable column '{}' is missing",
                    missing.name
                )));
            }
        }
        Ok(())
    }

    fn check_columns<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> DatasetResult<()> {
        for name in names {
            if self.schema.field(name).is_none() {
                return Err(DatasetError::ColumnNotFound(name.to_string()));
            }
        }
        Ok(())
    }
}

fn check_cell(field: Option<&Field>, name: &str, value: &Value) -> Result<(), String> {
    let field = field.ok_or_else(|| format!("unknown column '{}'", name))?;
    if value.is_null() {
        if field.nullable {
            return Ok(());
        }
        return Err(format!("column '{}' is not nullable", name));
    }
    if !field.data_type.accepts(value) {
        return Err(format!(
            "value {} is not a valid {} for column '{}'",
            value,
            field.data_type.as_str(),
            name
        ));
    }
    Ok(())
}

/// A row with its fragment's partition values filled in
struct RowView<'a> {
    dataset: &'a MemoryDataset,
    fragment: &'a MemoryFragment,
    row: &'a Map<String, Value>,
}

impl<'a> RowView<'a> {
    fn get(&self, name: &str) -> &'a Value {
        let source = if self.dataset.is_partition_column(name) {
            &self.fragment.partition
        } else {
            self.row
        };
        source.get(name).unwrap_or(&NULL_VALUE)
    }
}

fn eval_predicate(expr: &NativeExpr, row: &RowView<'_>) -> DatasetResult<bool> {
    match expr {
        NativeExpr::Field(_) | NativeExpr::Scalar(_) => match eval_operand(expr, row)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(DatasetError::InvalidFilter(format!(
                "{} is not a boolean",
                other
            ))),
        },
        NativeExpr::Compare { op, left, right } => {
            let l = eval_operand(left, row)?;
            let r = eval_operand(right, row)?;
            if l.is_null() || r.is_null() {
                return Ok(false);
            }
            let ord = compare(&l, &r)?;
            Ok(match op {
                NativeCompareOp::Equal => ord == Ordering::Equal,
                NativeCompareOp::NotEqual => ord != Ordering::Equal,
                NativeCompareOp::Less => ord == Ordering::Less,
                NativeCompareOp::LessEqual => ord != Ordering::Greater,
                NativeCompareOp::Greater => ord == Ordering::Greater,
                NativeCompareOp::GreaterEqual => ord != Ordering::Less,
            })
        }
        NativeExpr::And(l, r) => Ok(eval_predicate(l, row)? && eval_predicate(r, row)?),
        NativeExpr::Or(l, r) => Ok(eval_predicate(l, row)? || eval_predicate(r, row)?),
        NativeExpr::Invert(e) => Ok(!eval_predicate(e, row)?),
        NativeExpr::IsNull(e) => Ok(eval_operand(e, row)?.is_null()),
        NativeExpr::IsValid(e) => Ok(!eval_operand(e, row)?.is_null()),
    }
}

fn eval_operand(expr: &NativeExpr, row: &RowView<'_>) -> DatasetResult<Value> {
    match expr {
        NativeExpr::Field(name) => Ok(row.get(name).clone()),
        NativeExpr::Scalar(v) => Ok(v.clone()),
        other => eval_predicate(other, row).map(Value::Bool),
    }
}

fn compare(left: &Value, right: &Value) -> DatasetResult<Ordering> {
    let ord = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .zip(b.as_f64())
            .and_then(|(a, b)| a.partial_cmp(&b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };
    ord.ok_or_else(|| DatasetError::IncomparableValues {
        left: left.to_string(),
        right: right.to_string(),
    })
}

impl ExternalDataset for MemoryDataset {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn schema(&self) -> DatasetResult<Schema> {
        Ok(self.schema.clone())
    }

    fn partitioning(&self) -> Option<Partitioning> {
        self.partitioning.clone()
    }

    fn fragments(&self) -> DatasetResult<Vec<FragmentInfo>> {
        Ok(self
            .fragments
            .iter()
            .enumerate()
            .map(|(id, f)| FragmentInfo {
                id,
                row_count: f.rows.len(),
                partition: f.partition.clone(),
            })
            .collect())
    }

    fn to_batch(
        &self,
        filter: Option<&NativeExpr>,
        projection: Option<&[String]>,
    ) -> DatasetResult<Batch> {
        let names = match projection {
            Some(columns) => {
                self.check_columns(columns.iter().map(String::as_str))?;
                columns.to_vec()
            }
            None => self.schema.names(),
        };
        if let Some(expr) = filter {
            self.check_columns(expr.referenced_fields())?;
        }

        let mut values: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        let mut height = 0;
        for fragment in &self.fragments {
            for row in &fragment.rows {
                let view = RowView {
                    dataset: self,
                    fragment,
                    row,
                };
                if let Some(expr) = filter {
                    if !eval_predicate(expr, &view)? {
                        continue;
                    }
                }
                for (slot, name) in values.iter_mut().zip(&names) {
                    slot.push(view.get(name).clone());
                }
                height += 1;
            }
        }

        Batch::with_height(
            names
                .into_iter()
                .zip(values)
                .map(|(name, vals)| Column::new(name, vals))
                .collect(),
            height,
        )
    }
}
