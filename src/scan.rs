//! Dataset scan entrypoints
//!
//! `scan_dataset` turns an external dataset handle into a lazy frame.
//! `scan_ds` is its former name, kept as a forwarding shim.

use crate::dataset::DatasetReference;
use crate::frame::LazyFrame;
use crate::observability::{log_event_with_fields, Event};
use crate::planner::{DatasetScanNode, LogicalPlan, PlannerResult, ScanOptions};

const SCAN_DS_NOTICE: &str =
    "`scan_ds` has been renamed; this redirect is temporary, please use `scan_dataset` instead";

/// Scan an external dataset.
///
/// Useful for cloud or partitioned datasets. The handle is validated
/// structurally and shared with the returned frame; nothing is read until
/// the frame is collected.
///
/// With `allow_pushdown_filter` set, filters applied to the scan may be
/// evaluated by the dataset itself. This can lead to different results
/// for comparisons involving nulls, since the dataset handles them
/// differently from the host engine.
///
/// # Errors
///
/// `SCAN_INVALID_SOURCE` when `source` is null or malformed.
pub fn scan_dataset(source: &DatasetReference, options: ScanOptions) -> PlannerResult<LazyFrame> {
    let node = DatasetScanNode::try_new(source, options)?;
    Ok(LazyFrame::from(LogicalPlan::from(node)))
}

/// Argument shapes accepted by `scan_ds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyScanArgs {
    /// Flag omitted
    #[default]
    Omitted,
    /// Flag passed as a bare bool
    Positional(bool),
    /// Flag passed by name
    Keyword(ScanOptions),
}

impl LegacyScanArgs {
    /// Canonical options; values pass through unchanged
    pub fn normalize(self) -> ScanOptions {
        match self {
            LegacyScanArgs::Omitted => ScanOptions::default(),
            LegacyScanArgs::Positional(allow) => {
                ScanOptions::new().with_allow_pushdown_filter(allow)
            }
            LegacyScanArgs::Keyword(options) => options,
        }
    }
}

impl From<()> for LegacyScanArgs {
    fn from(_: ()) -> Self {
        LegacyScanArgs::Omitted
    }
}

impl From<bool> for LegacyScanArgs {
    fn from(allow: bool) -> Self {
        LegacyScanArgs::Positional(allow)
    }
}

impl From<ScanOptions> for LegacyScanArgs {
    fn from(options: ScanOptions) -> Self {
        LegacyScanArgs::Keyword(options)
    }
}

/// Former name of `scan_dataset`.
///
/// Logs one `DEPRECATED_ENTRYPOINT` warning per call, then forwards.
/// The result, including any error, is exactly what `scan_dataset` returns.
#[deprecated(since = "0.2.0", note = "renamed to `scan_dataset`")]
pub fn scan_ds(ds: &DatasetReference, args: impl Into<LegacyScanArgs>) -> PlannerResult<LazyFrame> {
    let options = args.into().normalize();
    log_event_with_fields(
        Event::DeprecatedEntrypoint,
        &[
            ("entrypoint", "scan_ds"),
            ("message", SCAN_DS_NOTICE),
            ("replacement", "scan_dataset"),
        ],
    );
    scan_dataset(ds, options)
}
