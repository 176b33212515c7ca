//! CLI command implementations
//!
//! Both commands build the same frame:
//!
//! 1. Load the config, if one is given
//! 2. Load the dataset definition
//! 3. Scan it, then apply `--filter` and `--select`

use serde_json::{json, Value};

use crate::config::BridgeConfig;
use crate::dataset::{DatasetReference, MemoryDataset};
use crate::frame::LazyFrame;
use crate::planner::{col, Expr, OptimizerConfig};
use crate::scan::scan_dataset;

use super::args::{Command, ScanArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_text};

/// Run the given CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Explain(args) => explain(&args),
        Command::Collect(args) => collect(&args),
    }
}

/// Print the optimized plan
pub fn explain(args: &ScanArgs) -> CliResult<()> {
    write_text(&explain_text(args)?)
}

/// Execute and print the result as one JSON line
pub fn collect(args: &ScanArgs) -> CliResult<()> {
    write_json(&collect_json(args)?)
}

/// Rendered plan, as printed by `explain`
pub fn explain_text(args: &ScanArgs) -> CliResult<String> {
    let (frame, optimizer) = build_frame(args)?;
    Ok(frame.explain(&optimizer).to_string())
}

/// `{"columns": [...], "row_count": n, "rows": [...]}`, as printed by `collect`
pub fn collect_json(args: &ScanArgs) -> CliResult<Value> {
    let (frame, optimizer) = build_frame(args)?;
    let batch = frame.collect_with(&optimizer)?;
    Ok(json!({
        "columns": batch.column_names(),
        "row_count": batch.height(),
        "rows": batch.to_rows(),
    }))
}

/// Builds the frame and optimizer settings described by `args`
pub fn build_frame(args: &ScanArgs) -> CliResult<(LazyFrame, OptimizerConfig)> {
    let config = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };

    let dataset_path = args
        .dataset
        .as_ref()
        .or(config.dataset.as_ref())
        .ok_or_else(|| {
            CliError::usage("No dataset given. Pass --dataset or set it in the config.")
        })?;
    let dataset = MemoryDataset::from_json_file(dataset_path)?;

    let mut options = config.scan;
    if args.no_pushdown {
        options = options.with_allow_pushdown_filter(false);
    }
    let mut optimizer = config.optimizer;
    if args.trace {
        optimizer = optimizer.with_trace(true);
    }

    let mut frame = scan_dataset(&DatasetReference::from_dataset(dataset), options)?;
    if let Some(filter) = &args.filter {
        frame = frame.filter(parse_filter(filter)?);
    }
    if !args.select.is_empty() {
        frame = frame.select(args.select.iter().cloned());
    }
    Ok((frame, optimizer))
}

/// Parses `--filter`: JSON objects are expressions, anything else is a
/// column name.
pub fn parse_filter(text: &str) -> CliResult<Expr> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CliError::usage("Filter must not be empty"));
    }
    if !trimmed.starts_with('{') {
        return Ok(col(trimmed));
    }
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| CliError::usage(format!("Invalid filter JSON: {}", e)))?;
    serde_json::from_value(value)
        .map_err(|e| CliError::usage(format!("Invalid filter expression: {}", e)))
}
