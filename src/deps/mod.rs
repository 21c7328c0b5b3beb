//! Dependency-aware record ordering
//!
//! Orders a flat, mixed-model sequence of records so that every model
//! appears after all models it depends on, while the records within each
//! model keep their input order. Edges come from the registry: explicit
//! dependency declarations plus the target of every forward relation,
//! restricted to models actually present in the input; edges to absent
//! models impose no constraint and never block the sort.
//!
//! Kahn's algorithm over the present-model graph: in-degrees seeded from the
//! restricted edges, the ready queue drained in first-seen input order so the
//! result is deterministic.

mod errors;

pub use errors::{SortError, SortResult};

use std::collections::{HashMap, VecDeque};

use crate::model::ModelRegistry;
use crate::store::Record;

/// Sorts mixed-model record sets into dependency order
pub struct DependencySorter<'r> {
    registry: &'r ModelRegistry,
}

impl<'r> DependencySorter<'r> {
    /// Creates a sorter over the given registry
    pub fn new(registry: &'r ModelRegistry) -> Self {
        Self { registry }
    }

    /// Reorders records so every model follows its dependencies.
    ///
    /// Fails with [`SortError::CircularDependency`] when the models present
    /// in the input form a cycle.
    pub fn sort(&self, records: Vec<Record>) -> SortResult<Vec<Record>> {
        // Group by model, keeping each group's internal order and the
        // first-seen order of models.
        let mut model_order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<Record>> = HashMap::new();
        for record in records {
            if !groups.contains_key(&record.model) {
                model_order.push(record.model.clone());
            }
            groups.entry(record.model.clone()).or_default().push(record);
        }

        let ordered_models = self.sort_models(&model_order)?;

        let mut output = Vec::new();
        for model in ordered_models {
            if let Some(group) = groups.remove(&model) {
                output.extend(group);
            }
        }
        Ok(output)
    }

    /// Topologically orders the given models (first-seen order preserved
    /// among unconstrained models).
    fn sort_models(&self, present: &[String]) -> SortResult<Vec<String>> {
        let position: HashMap<&str, usize> = present
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        // Edges restricted to present models; unknown models contribute no
        // edges (a record set may carry models the registry never saw).
        let mut in_degree: Vec<usize> = vec![0; present.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); present.len()];
        for (i, name) in present.iter().enumerate() {
            let Some(meta) = self.registry.get(name) else {
                continue;
            };
            for dep in meta.dependency_edges() {
                if let Some(&dep_pos) = position.get(dep) {
                    in_degree[i] += 1;
                    dependents[dep_pos].push(i);
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..present.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut emitted: Vec<String> = Vec::with_capacity(present.len());

        while let Some(i) = ready.pop_front() {
            emitted.push(present[i].clone());
            for &dependent in &dependents[i] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if emitted.len() < present.len() {
            let mut remaining: Vec<String> = present
                .iter()
                .filter(|name| !emitted.contains(name))
                .cloned()
                .collect();
            remaining.sort();
            return Err(SortError::CircularDependency { models: remaining });
        }

        Ok(emitted)
    }
}
