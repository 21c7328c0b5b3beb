//! CLI command implementations
//!
//! Thin glue: load the dataset into an in-memory store, hand everything to
//! the dump workflow, write the result. All policy lives in the library.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dump::{DumpJob, DumpOptions};
use crate::model::ModelRegistry;
use crate::store::{Dataset, MemoryStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatches a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Dump {
            models,
            data,
            format,
            indent,
            exclude,
            limit,
            sort,
            step,
            no_follow,
            output,
        } => dump(
            &data,
            DumpOptions {
                models,
                exclude,
                limit,
                sort: sort.into(),
                step,
                follow_relations: !no_follow,
                format,
                indent,
            },
            output,
        ),
        Command::Models { data } => models(&data),
    }
}

/// Runs a dump and writes it to the chosen destination
fn dump(data: &Path, options: DumpOptions, output: Option<PathBuf>) -> CliResult<()> {
    let (registry, store) = load_dataset(data)?;
    let text = DumpJob::new(&store, &registry).run(&options)?;

    match output {
        Some(path) => fs::write(&path, text).map_err(|source| CliError::OutputWrite {
            path,
            source,
        })?,
        None => println!("{}", text),
    }
    Ok(())
}

/// Lists the models a dataset declares, one per line
fn models(data: &Path) -> CliResult<()> {
    let (registry, _) = load_dataset(data)?;
    for name in registry.names() {
        println!("{}", name);
    }
    Ok(())
}

/// Reads and parses a dataset file
fn load_dataset(path: &Path) -> CliResult<(ModelRegistry, MemoryStore)> {
    let text = fs::read_to_string(path).map_err(|source| CliError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_json(&text).map_err(|source| CliError::DatasetParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dataset.into_parts())
}
