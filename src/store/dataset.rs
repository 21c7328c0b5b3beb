//! Dataset file format
//!
//! A dataset is a single JSON document holding model metadata and rows:
//!
//! ```json
//! {
//!   "models": [
//!     {"name": "author"},
//!     {"name": "post", "relations": [
//!       {"name": "author", "target": "author", "column": "author_id",
//!        "kind": "forward_one"}]}
//!   ],
//!   "records": {
//!     "author": [{"id": 1, "name": "ada"}],
//!     "post": [{"id": 1, "author_id": 1, "title": "first"}]
//!   }
//! }
//! ```
//!
//! Models without a `records` entry are registered with zero rows.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::model::{ModelMeta, ModelRegistry};

use super::memory::MemoryStore;

/// A parsed dataset file
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Model metadata in declaration order
    pub models: Vec<ModelMeta>,
    /// Rows keyed by model name
    #[serde(default)]
    pub records: HashMap<String, Vec<Value>>,
}

impl Dataset {
    /// Parses a dataset from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Splits the dataset into a registry and a populated in-memory store.
    ///
    /// Row order within each model follows the file; rows for models never
    /// declared under `models` are ignored.
    pub fn into_parts(mut self) -> (ModelRegistry, MemoryStore) {
        let mut registry = ModelRegistry::new();
        let mut store = MemoryStore::new();

        for meta in self.models {
            let rows = self.records.remove(&meta.name).unwrap_or_default();
            store.insert_model(meta.name.clone(), rows);
            registry.register(meta);
        }

        (registry, store)
    }
}
