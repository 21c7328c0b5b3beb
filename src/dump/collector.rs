//! Working set collection
//!
//! Builds the in-memory record set a dump serializes: every selected model's
//! rows (streamed through the range iterator in bounded windows), plus, when
//! relation following is on, every record those rows reference, pulled
//! transitively breadth-first. The working set never holds the same record
//! identity twice.

use std::collections::{HashSet, VecDeque};

use serde_json::Value;

use crate::model::{ModelRegistry, RelationKind};
use crate::observability::{Event, Logger};
use crate::range::{RangeIterator, RangeOptions};
use crate::store::{Predicate, QuerySpec, Record, RecordKey, SortDirection, Store};

use super::errors::DumpResult;
use super::DumpOptions;

/// An ordered record set with a no-duplicate-identity invariant
#[derive(Debug, Default)]
pub struct WorkingSet {
    records: Vec<Record>,
    seen: HashSet<RecordKey>,
}

impl WorkingSet {
    /// Creates an empty working set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record unless its identity is already present.
    /// Returns true if the record was added.
    pub fn insert(&mut self, record: Record, primary_key: &str) -> bool {
        if self.seen.insert(record.key(primary_key)) {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    /// Returns true if the identity is already present
    pub fn contains(&self, key: &RecordKey) -> bool {
        self.seen.contains(key)
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are held
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the set, yielding records in insertion order
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Collects the working set for a dump run
pub struct Collector<'a, S: Store + ?Sized> {
    store: &'a S,
    registry: &'a ModelRegistry,
}

impl<'a, S: Store + ?Sized> Collector<'a, S> {
    /// Creates a collector over a store and its registry
    pub fn new(store: &'a S, registry: &'a ModelRegistry) -> Self {
        Self { store, registry }
    }

    /// Collects all selected models' rows plus transitively referenced
    /// records, deduplicated by identity, in collection order.
    pub fn collect(&self, options: &DumpOptions) -> DumpResult<Vec<Record>> {
        let selected = self.selected_models(options)?;

        let mut working = WorkingSet::new();
        // Batches waiting for the transitive relation walk
        let mut pending: VecDeque<(String, Vec<Record>)> = VecDeque::new();

        for model in &selected {
            let batch = self.collect_model(model, options)?;
            Logger::trace(
                Event::CollectModel,
                &[("model", model), ("rows", &batch.len().to_string())],
            );

            let primary_key = &self.registry.require(model)?.primary_key;
            let mut fresh = Vec::new();
            for record in batch {
                if working.insert(record.clone(), primary_key) {
                    fresh.push(record);
                }
            }
            if !fresh.is_empty() && options.follow_relations {
                pending.push_back((model.clone(), fresh));
            }
        }

        while let Some((model, batch)) = pending.pop_front() {
            self.walk_relations(&model, &batch, &mut working, &mut pending)?;
        }

        Ok(working.into_records())
    }

    /// Resolves the selected model list: explicit names (validated against
    /// the registry) or every registered model, minus exclusions.
    fn selected_models(&self, options: &DumpOptions) -> DumpResult<Vec<String>> {
        let mut selected = Vec::new();
        if options.models.is_empty() {
            for name in self.registry.names() {
                if !options.exclude.iter().any(|e| e == name) {
                    selected.push(name.to_string());
                }
            }
        } else {
            for name in &options.models {
                self.registry.require(name)?;
                if !options.exclude.iter().any(|e| e == name) {
                    selected.push(name.clone());
                }
            }
        }
        Ok(selected)
    }

    /// Streams one model's rows through the range iterator
    fn collect_model(&self, model: &str, options: &DumpOptions) -> DumpResult<Vec<Record>> {
        let step = i64::try_from(options.step).unwrap_or(i64::MAX);
        let range_options = RangeOptions {
            step: match options.sort {
                SortDirection::Asc => step,
                SortDirection::Desc => -step,
            },
            limit: options.limit,
            ..RangeOptions::default()
        };

        let mut range = RangeIterator::new(QuerySpec::all(model), range_options, self.registry)?;
        let mut batch = Vec::new();
        for record in range.iter(self.store) {
            batch.push(record?);
        }
        Ok(batch)
    }

    /// Pulls records referenced by a batch and queues them for their own walk
    fn walk_relations(
        &self,
        model: &str,
        batch: &[Record],
        working: &mut WorkingSet,
        pending: &mut VecDeque<(String, Vec<Record>)>,
    ) -> DumpResult<()> {
        let Some(meta) = self.registry.get(model) else {
            return Ok(());
        };

        for relation in &meta.relations {
            // Forward relations reference parents by FK; multi-valued
            // relations pull children keyed by this model's pk. Reverse
            // one-to-one fields mirror a forward FK on the target and are
            // pulled from that side instead.
            let (source_column, target_column) = match relation.kind {
                RelationKind::ForwardOne => {
                    let target_pk = &self.registry.require(&relation.target)?.primary_key;
                    (relation.column.as_str(), target_pk.as_str())
                }
                RelationKind::Many => (meta.primary_key.as_str(), relation.column.as_str()),
                RelationKind::ReverseOne => continue,
            };

            let mut values: Vec<Value> = Vec::new();
            for record in batch {
                if let Some(v) = record.field(source_column) {
                    if values.contains(v) {
                        continue;
                    }
                    // A forward join value is the target's identity; values
                    // already in the working set need no fetch.
                    if relation.kind == RelationKind::ForwardOne
                        && working.contains(&RecordKey::new(&relation.target, Some(v)))
                    {
                        continue;
                    }
                    values.push(v.clone());
                }
            }
            if values.is_empty() {
                continue;
            }

            let query = QuerySpec::all(relation.target.clone())
                .filter(Predicate::is_in(target_column, values));
            let fetched = self.store.execute(&query)?;

            let target_pk = &self.registry.require(&relation.target)?.primary_key;
            let mut fresh = Vec::new();
            for record in fetched {
                if working.insert(record.clone(), target_pk) {
                    fresh.push(record);
                }
            }
            if !fresh.is_empty() {
                Logger::trace(
                    Event::RelationPull,
                    &[
                        ("model", model),
                        ("pulled", &fresh.len().to_string()),
                        ("relation", &relation.name),
                    ],
                );
                pending.push_back((relation.target.clone(), fresh));
            }
        }
        Ok(())
    }
}
