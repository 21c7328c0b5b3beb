//! CLI argument definitions using clap
//!
//! Commands:
//! - datapump dump [MODELS]... --data <file> [--format <name>] [...]
//! - datapump models --data <file>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::store::SortDirection;

/// datapump - dependency-ordered data export for relational stores
#[derive(Parser, Debug)]
#[command(name = "datapump")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export records as a dependency-ordered fixture
    Dump {
        /// Models to dump (all registered models when omitted)
        models: Vec<String>,

        /// Path to the dataset file
        #[arg(long)]
        data: PathBuf,

        /// Output serialization format
        #[arg(long, default_value = "json")]
        format: String,

        /// Indent level for pretty-printed output
        #[arg(long)]
        indent: Option<u16>,

        /// Model to exclude (repeat to exclude several)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Limit the number of directly collected rows per model
        #[arg(short, long)]
        limit: Option<u64>,

        /// Collection order on each model's primary key
        #[arg(short, long, value_enum, default_value_t = SortArg::Asc)]
        sort: SortArg,

        /// Traversal window size
        #[arg(long, default_value_t = 100)]
        step: u64,

        /// Do not pull records referenced by the collected rows
        #[arg(long)]
        no_follow: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the models a dataset declares
    Models {
        /// Path to the dataset file
        #[arg(long)]
        data: PathBuf,
    },
}

/// Sort direction argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Ascending primary-key order
    Asc,
    /// Descending primary-key order
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortDirection::Asc,
            SortArg::Desc => SortDirection::Desc,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
