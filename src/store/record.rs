//! Record representation
//!
//! A record is a typed JSON object plus a transient attachment cache. The
//! cache is an explicit optional-value slot per relation: a present key means
//! the relation was resolved for this record, with `None` standing for
//! "resolved, no match". Attachments never touch the backing store.

use std::collections::HashMap;

use serde_json::Value;

/// A single record of some model
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Model name
    pub model: String,
    /// Field values as a JSON object
    pub body: Value,
    /// Resolved relation cache, keyed by relation field name
    attached: HashMap<String, Option<Box<Record>>>,
}

impl Record {
    /// Creates a record from a model name and a JSON object body
    pub fn new(model: impl Into<String>, body: Value) -> Self {
        Self {
            model: model.into(),
            body,
            attached: HashMap::new(),
        }
    }

    /// Returns a field value, if present and non-null
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self.body.get(name) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    /// Returns true if the relation slot has been resolved (hit or miss)
    pub fn has_attached(&self, name: &str) -> bool {
        self.attached.contains_key(name)
    }

    /// Returns the resolved relation slot: `None` = unresolved,
    /// `Some(None)` = resolved to no match, `Some(Some(r))` = resolved target
    pub fn attached(&self, name: &str) -> Option<Option<&Record>> {
        self.attached.get(name).map(|slot| slot.as_deref())
    }

    /// Stores a resolved relation value (or an absent marker)
    pub fn set_attached(&mut self, name: impl Into<String>, target: Option<Record>) {
        self.attached.insert(name.into(), target.map(Box::new));
    }

    /// Identity key for dedup purposes
    pub fn key(&self, primary_key: &str) -> RecordKey {
        RecordKey::new(&self.model, self.field(primary_key))
    }
}

/// Stable record identity: model name plus canonical primary-key text.
///
/// JSON values are not hashable, so the key value is canonicalized to its
/// compact JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    model: String,
    pk: String,
}

impl RecordKey {
    /// Builds a key from a model name and an optional primary-key value
    pub fn new(model: &str, pk: Option<&Value>) -> Self {
        Self {
            model: model.to_string(),
            pk: pk.map_or_else(|| "null".to_string(), Value::to_string),
        }
    }
}
