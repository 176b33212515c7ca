//! CLI argument definitions using clap
//!
//! Commands:
//! - scanbridge explain --dataset <path> [--filter <expr>] [--select <cols>]
//! - scanbridge collect --dataset <path> [--filter <expr>] [--select <cols>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// scanbridge - lazy scans over external datasets
#[derive(Parser, Debug)]
#[command(name = "scanbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the optimized plan of a scan
    Explain(ScanArgs),

    /// Execute a scan and print the rows as JSON
    Collect(ScanArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Dataset definition file (JSON); overrides `dataset` in the config
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Filter predicate: a boolean column name or an expression in JSON
    #[arg(long)]
    pub filter: Option<String>,

    /// Columns to keep, comma separated
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Build the scan with filter pushdown disallowed
    #[arg(long)]
    pub no_pushdown: bool,

    /// Log optimizer decisions to stderr
    #[arg(long)]
    pub trace: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
