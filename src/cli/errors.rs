//! CLI-specific error types
//!
//! Every CLI error aborts the process with a non-zero exit and a
//! descriptive message on stderr.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::dump::DumpError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// The dataset file could not be read
    #[error("cannot read dataset {}: {source}", .path.display())]
    DatasetRead {
        /// Dataset path
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// The dataset file is not valid JSON for the expected shape
    #[error("invalid dataset {}: {source}", .path.display())]
    DatasetParse {
        /// Dataset path
        path: PathBuf,
        /// Underlying parse failure
        source: serde_json::Error,
    },

    /// The output file could not be written
    #[error("cannot write output {}: {source}", .path.display())]
    OutputWrite {
        /// Output path
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// The dump run itself failed
    #[error(transparent)]
    Dump(#[from] DumpError),
}
