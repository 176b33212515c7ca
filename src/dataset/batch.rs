//! Columnar batches exchanged between the dataset and the host engine

use serde_json::{Map, Value};

use super::errors::{DatasetError, DatasetResult};

/// A named column of cells. `Value::Null` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// Equal-length columns
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    columns: Vec<Column>,
    height: usize,
}

impl Batch {
    /// Creates a batch, rejecting columns of unequal length
    pub fn new(columns: Vec<Column>) -> DatasetResult<Self> {
        let height = columns.first().map(|c| c.values.len()).unwrap_or(0);
        Self::with_height(columns, height)
    }

    /// Creates a batch of `height` rows; a batch without columns keeps its height
    pub fn with_height(columns: Vec<Column>, height: usize) -> DatasetResult<Self> {
        if let Some(bad) = columns.iter().find(|c| c.values.len() != height) {
            return Err(DatasetError::InvalidDefinition(format!(
                "column '{}' has {} values, expected {}",
                bad.name,
                bad.values.len(),
                height
            )));
        }
        Ok(Self { columns, height })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell lookup; `None` if the column does not exist or the row is out of range
    pub fn value(&self, column: &str, row: usize) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(row))
    }

    /// Keeps the rows whose mask entry is true
    pub fn filter_rows(&self, mask: &[bool]) -> Batch {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|c| {
                let values = c
                    .values
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone())
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        let height = mask.iter().take(self.height).filter(|k| **k).count();
        Batch { columns, height }
    }

    /// Returns the named columns in the requested order
    pub fn project(&self, names: &[String]) -> DatasetResult<Batch> {
        let columns = names
            .iter()
            .map(|n| {
                self.column(n)
                    .cloned()
                    .ok_or_else(|| DatasetError::ColumnNotFound(n.clone()))
            })
            .collect::<DatasetResult<Vec<_>>>()?;
        Ok(Batch {
            columns,
            height: self.height,
        })
    }

    /// Renders rows as JSON objects, keyed by column name
    pub fn to_rows(&self) -> Vec<Map<String, Value>> {
        (0..self.height)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[row].clone()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Batch {
        Batch::new(vec![
            Column::new("a", vec![json!(1), json!(2), json!(3)]),
            Column::new("b", vec![json!("x"), Value::Null, json!("z")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let result = Batch::new(vec![
            Column::new("a", vec![json!(1)]),
            Column::new("b", vec![]),
        ]);
        assert!(matches!(result, Err(DatasetError::InvalidDefinition(_))));
    }

    #[test]
    fn test_columnless_batch_keeps_height() {
        let batch = Batch::with_height(vec![], 4).unwrap();
        assert_eq!(batch.height(), 4);
        assert_eq!(batch.to_rows().len(), 4);

        let projected = sample().project(&[]).unwrap();
        assert_eq!(projected.height(), 3);
        assert!(projected.column_names().is_empty());
    }

    #[test]
    fn test_filter_rows() {
        let filtered = sample().filter_rows(&[true, false, true]);
        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.value("b", 1), Some(&json!("z")));
    }

    #[test]
    fn test_project_reorders() {
        let projected = sample().project(&["b".into(), "a".into()]).unwrap();
        assert_eq!(projected.column_names(), vec!["b", "a"]);
        assert_eq!(projected.height(), 3);
    }

    #[test]
    fn test_project_missing_column() {
        let err = sample().project(&["nope".into()]).unwrap_err();
        assert_eq!(err, DatasetError::ColumnNotFound("nope".into()));
    }

    #[test]
    fn test_null_count_and_rows() {
        let batch = sample();
        assert_eq!(batch.column("b").unwrap().null_count(), 1);
        let rows = batch.to_rows();
        assert_eq!(rows[1]["b"], Value::Null);
    }
}
