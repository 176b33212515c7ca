//! Opaque handles to externally-managed datasets
//!
//! A `DatasetReference` is created by the caller and shared, never copied,
//! with every plan node built from it. Equality is identity: two references
//! are equal when they point at the same external dataset object.

use std::fmt;
use std::sync::Arc;

use super::batch::Batch;
use super::errors::DatasetResult;
use super::native::NativeExpr;
use super::schema::{FragmentInfo, Partitioning, Schema};

/// The external dataset library as seen from the host engine.
///
/// Only the executor calls these methods, and only when a plan is
/// collected. Constructing a scan never touches them beyond `identity`.
pub trait ExternalDataset: fmt::Debug + Send + Sync {
    /// Stable identity string; an empty identity marks a malformed handle
    fn identity(&self) -> &str;

    fn schema(&self) -> DatasetResult<Schema>;

    fn partitioning(&self) -> Option<Partitioning> {
        None
    }

    fn fragments(&self) -> DatasetResult<Vec<FragmentInfo>>;

    /// Materializes the dataset.
    ///
    /// `filter` is evaluated with the library's own semantics, which may
    /// treat nulls differently from the host engine. `projection` restricts
    /// and orders the returned columns.
    fn to_batch(
        &self,
        filter: Option<&NativeExpr>,
        projection: Option<&[String]>,
    ) -> DatasetResult<Batch>;
}

/// Structural defects that make a handle unusable as a scan source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleDefect {
    Null,
    EmptyIdentity,
}

impl HandleDefect {
    pub fn describe(&self) -> &'static str {
        match self {
            HandleDefect::Null => "dataset handle is null",
            HandleDefect::EmptyIdentity => "dataset handle has an empty identity",
        }
    }
}

/// Shared handle to an external dataset; `null()` when absent
#[derive(Clone, Default)]
pub struct DatasetReference {
    handle: Option<Arc<dyn ExternalDataset>>,
}

impl DatasetReference {
    pub fn new(dataset: Arc<dyn ExternalDataset>) -> Self {
        Self {
            handle: Some(dataset),
        }
    }

    pub fn from_dataset<D: ExternalDataset + 'static>(dataset: D) -> Self {
        Self::new(Arc::new(dataset))
    }

    /// The null handle
    pub fn null() -> Self {
        Self { handle: None }
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_none()
    }

    pub fn dataset(&self) -> Option<&Arc<dyn ExternalDataset>> {
        self.handle.as_ref()
    }

    pub fn identity(&self) -> Option<&str> {
        self.handle.as_deref().map(|d| d.identity())
    }

    /// Structural check only: present and identified
    pub fn check_well_formed(&self) -> Result<&Arc<dyn ExternalDataset>, HandleDefect> {
        let dataset = self.handle.as_ref().ok_or(HandleDefect::Null)?;
        if dataset.identity().trim().is_empty() {
            return Err(HandleDefect::EmptyIdentity);
        }
        Ok(dataset)
    }
}

impl PartialEq for DatasetReference {
    fn eq(&self, other: &Self) -> bool {
        match (&self.handle, &other.handle) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl Eq for DatasetReference {}

impl fmt::Debug for DatasetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity() {
            Some(id) => write!(f, "DatasetReference({})", id),
            None => write!(f, "DatasetReference(null)"),
        }
    }
}

impl<D: ExternalDataset + 'static> From<Arc<D>> for DatasetReference {
    fn from(dataset: Arc<D>) -> Self {
        Self::new(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::memory::MemoryDataset;
    use crate::dataset::schema::{DataType, Field};

    fn dataset(name: &str) -> MemoryDataset {
        MemoryDataset::new(Schema::new(vec![Field::new("a", DataType::Int64)])).with_name(name)
    }

    #[test]
    fn test_clone_shares_identity() {
        let d = DatasetReference::from_dataset(dataset("events"));
        let shared = d.clone();
        assert_eq!(d, shared);
        assert_eq!(shared.identity(), Some("events"));
    }

    #[test]
    fn test_equal_content_is_not_equal_identity() {
        let a = DatasetReference::from_dataset(dataset("events"));
        let b = DatasetReference::from_dataset(dataset("events"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_null_handle() {
        let null = DatasetReference::null();
        assert!(null.is_null());
        assert_eq!(null, DatasetReference::default());
        assert_eq!(null.check_well_formed().unwrap_err(), HandleDefect::Null);
        assert_eq!(format!("{:?}", null), "DatasetReference(null)");
    }

    #[test]
    fn test_empty_identity_is_malformed() {
        let d = DatasetReference::from_dataset(dataset(""));
        assert_eq!(
            d.check_well_formed().unwrap_err(),
            HandleDefect::EmptyIdentity
        );
    }
}
