//! CLI module for datapump
//!
//! Resolves user-specified model and format names, drives the dump
//! workflow, and writes the serialized output.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, SortArg};
pub use commands::run_command;
pub use errors::{CliError, CliResult};

/// Parses arguments and runs the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
