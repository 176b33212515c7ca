//! Scan Construction Tests
//!
//! - The node keeps the handle and flag exactly as given
//! - Omitted options mean pushdown is allowed
//! - Null and malformed handles are rejected with SCAN_INVALID_SOURCE
//! - Construction is pure and repeatable

use std::sync::Arc;

use scanbridge::dataset::{
    Batch, DataType, DatasetResult, Field, FragmentInfo, HandleDefect, NativeExpr, Schema,
};
use scanbridge::observability::Logger;
use scanbridge::planner::PlannerErrorCode;
use scanbridge::{scan_dataset, DatasetReference, ExternalDataset, MemoryDataset, ScanOptions};

// =============================================================================
// Helper Functions
// =============================================================================

fn reference(name: &str) -> DatasetReference {
    DatasetReference::from_dataset(
        MemoryDataset::new(Schema::new(vec![Field::new("bools", DataType::Boolean)]))
            .with_name(name),
    )
}

/// Dataset that fails any access beyond its identity
#[derive(Debug)]
struct Untouchable {
    identity: String,
}

impl ExternalDataset for Untouchable {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn schema(&self) -> DatasetResult<Schema> {
        panic!("schema accessed during construction")
    }

    fn fragments(&self) -> DatasetResult<Vec<FragmentInfo>> {
        panic!("fragments accessed during construction")
    }

    fn to_batch(
        &self,
        _filter: Option<&NativeExpr>,
        _projection: Option<&[String]>,
    ) -> DatasetResult<Batch> {
        panic!("data read during construction")
    }
}

// =============================================================================
// Capture Tests
// =============================================================================

/// source and flag round-trip for both flag values.
#[test]
fn test_source_and_flag_round_trip() {
    let d = reference("flags");
    for allow in [true, false] {
        let frame =
            scan_dataset(&d, ScanOptions::new().with_allow_pushdown_filter(allow)).unwrap();
        let node = frame.scan_node();
        assert_eq!(node.source(), &d);
        assert_eq!(node.allow_pushdown_filter(), allow);
    }
}

/// Default options behave as allow_pushdown_filter = true.
#[test]
fn test_default_options_allow_pushdown() {
    let d = reference("flags");
    let defaulted = scan_dataset(&d, ScanOptions::default()).unwrap();
    let explicit = scan_dataset(&d, ScanOptions::new().with_allow_pushdown_filter(true)).unwrap();
    assert_eq!(defaulted, explicit);

    let from_json: ScanOptions = serde_json::from_str("{}").unwrap();
    assert!(from_json.allow_pushdown_filter);
}

/// The node shares the caller's dataset instead of copying it.
#[test]
fn test_node_shares_dataset() {
    let dataset = Arc::new(MemoryDataset::new(Schema::default()).with_name("shared"));
    let d = DatasetReference::from(Arc::clone(&dataset));
    let frame = scan_dataset(&d, ScanOptions::default()).unwrap();

    assert!(Arc::strong_count(&dataset) > 2);
    drop(frame);
    assert_eq!(Arc::strong_count(&dataset), 2);
}

/// Distinct datasets with the same name are distinct sources.
#[test]
fn test_equality_is_identity() {
    let a = reference("same");
    let b = reference("same");
    let scan_a = scan_dataset(&a, ScanOptions::default()).unwrap();
    let scan_b = scan_dataset(&b, ScanOptions::default()).unwrap();
    assert_ne!(scan_a, scan_b);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_null_source_rejected() {
    let err = scan_dataset(&DatasetReference::null(), ScanOptions::default()).unwrap_err();
    assert_eq!(err.code(), PlannerErrorCode::InvalidSource);
    assert_eq!(err.code().code(), "SCAN_INVALID_SOURCE");
    assert_eq!(err.defect(), Some(HandleDefect::Null));
}

#[test]
fn test_empty_identity_rejected() {
    let d = DatasetReference::from_dataset(Untouchable {
        identity: "  ".into(),
    });
    let err = scan_dataset(&d, ScanOptions::default()).unwrap_err();
    assert!(err.is_invalid_source());
    assert_eq!(err.defect(), Some(HandleDefect::EmptyIdentity));
}

/// The flag value never affects rejection.
#[test]
fn test_rejection_independent_of_flag() {
    for allow in [true, false] {
        let options = ScanOptions::new().with_allow_pushdown_filter(allow);
        assert!(scan_dataset(&DatasetReference::null(), options).is_err());
    }
}

// =============================================================================
// Purity Tests
// =============================================================================

/// Construction reads nothing and logs nothing.
#[test]
fn test_construction_is_pure() {
    let d = DatasetReference::from_dataset(Untouchable {
        identity: "remote".into(),
    });
    let (result, lines) = Logger::capture(|| scan_dataset(&d, ScanOptions::default()));
    assert!(result.is_ok());
    assert!(lines.is_empty());
}

/// Two identical constructions are independent and equal.
#[test]
fn test_construction_is_idempotent() {
    let d = reference("flags");
    let first = scan_dataset(&d, ScanOptions::default()).unwrap();
    let second = scan_dataset(&d, ScanOptions::default()).unwrap();
    assert_eq!(first, second);

    let filtered = first.filter("bools");
    assert_eq!(second.scan_node().source(), &d);
    assert_ne!(filtered.logical_plan(), second.logical_plan());
}
