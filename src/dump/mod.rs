//! Dump workflow
//!
//! Orchestrates one export run: validate the output format, collect the
//! working set (optionally following relations), order it so referenced
//! records serialize before the records referencing them, then serialize.
//!
//! ```ignore
//! let job = DumpJob::new(&store, &registry);
//! let output = job.run(&DumpOptions::default())?;
//! ```

mod collector;
mod errors;

pub use collector::{Collector, WorkingSet};
pub use errors::{DumpError, DumpResult};

use crate::deps::DependencySorter;
use crate::model::ModelRegistry;
use crate::observability::{Event, Logger};
use crate::serializer::for_format;
use crate::store::{SortDirection, Store};

/// Options for one dump run
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Models to dump; empty means every registered model
    pub models: Vec<String>,
    /// Models to leave out
    pub exclude: Vec<String>,
    /// Per-model cap on directly collected rows
    pub limit: Option<u64>,
    /// Collection order on each model's primary key
    pub sort: SortDirection,
    /// Window size for collection traversal
    pub step: u64,
    /// Whether to pull records referenced by the collected rows
    pub follow_relations: bool,
    /// Output format name
    pub format: String,
    /// Pretty-print indent width, where the format supports it
    pub indent: Option<u16>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            exclude: Vec::new(),
            limit: None,
            sort: SortDirection::Asc,
            step: 100,
            follow_relations: true,
            format: "json".to_string(),
            indent: None,
        }
    }
}

/// One dump run over a store and its registry
pub struct DumpJob<'a, S: Store + ?Sized> {
    store: &'a S,
    registry: &'a ModelRegistry,
}

impl<'a, S: Store + ?Sized> DumpJob<'a, S> {
    /// Creates a job over a store and its registry
    pub fn new(store: &'a S, registry: &'a ModelRegistry) -> Self {
        Self { store, registry }
    }

    /// Runs the dump and returns the serialized output.
    ///
    /// The format name is resolved before any records are collected, so an
    /// unknown format fails fast.
    pub fn run(&self, options: &DumpOptions) -> DumpResult<String> {
        let serializer = for_format(&options.format)?;

        let models = if options.models.is_empty() {
            "all".to_string()
        } else {
            options.models.join(",")
        };
        Logger::info(
            Event::DumpStart,
            &[("format", &options.format), ("models", &models)],
        );

        let records = match Collector::new(self.store, self.registry).collect(options) {
            Ok(records) => records,
            Err(e) => {
                Logger::error(Event::DumpFailed, &[("stage", "collect")]);
                return Err(e);
            }
        };

        Logger::trace(Event::SortStart, &[("records", &records.len().to_string())]);
        let ordered = match DependencySorter::new(self.registry).sort(records) {
            Ok(ordered) => ordered,
            Err(e) => {
                Logger::error(Event::DumpFailed, &[("stage", "sort")]);
                return Err(e.into());
            }
        };
        Logger::trace(Event::SortComplete, &[("records", &ordered.len().to_string())]);

        let output = serializer.serialize(&ordered, self.registry, options.indent)?;
        Logger::trace(
            Event::SerializeComplete,
            &[("format", serializer.format_name())],
        );
        Logger::info(
            Event::DumpComplete,
            &[
                ("bytes", &output.len().to_string()),
                ("records", &ordered.len().to_string()),
            ],
        );
        Ok(output)
    }
}
