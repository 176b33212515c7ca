//! CLI module for scanbridge
//!
//! Provides command-line interface for:
//! - explain: Print the optimized plan of a dataset scan
//! - collect: Execute a dataset scan and print its rows

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ScanArgs};
pub use commands::{
    build_frame, collect, collect_json, explain, explain_text, parse_filter, run_command,
};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
