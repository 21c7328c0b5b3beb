//! Model metadata
//!
//! Record types do not expose field descriptors for reflection; instead each
//! model registers an explicit [`ModelMeta`] describing its primary key, its
//! relation fields, and any explicitly declared dependencies. The
//! [`ModelRegistry`] is the single capability contract the iterator, the
//! attachment helper, and the sorter query.

mod errors;

pub use errors::{ModelError, ModelResult};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a relation field resolves to its target records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Foreign-key column on this model holding the target's primary key
    ForwardOne,
    /// Single related record on the target model whose column holds this
    /// model's primary key
    ReverseOne,
    /// Multi-valued reverse relation (target column holds this model's
    /// primary key); followed by the dump collector, never attached
    Many,
}

/// A named relation from one model to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationField {
    /// Field name the attachment is cached under
    pub name: String,
    /// Target model name
    pub target: String,
    /// Join column: on this model for `ForwardOne`, on the target otherwise
    pub column: String,
    /// Resolution strategy
    pub kind: RelationKind,
}

impl RelationField {
    /// Forward foreign-key relation
    pub fn forward(
        name: impl Into<String>,
        target: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            column: column.into(),
            kind: RelationKind::ForwardOne,
        }
    }

    /// Reverse one-to-one relation
    pub fn reverse_one(
        name: impl Into<String>,
        target: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            column: column.into(),
            kind: RelationKind::ReverseOne,
        }
    }

    /// Multi-valued reverse relation
    pub fn many(
        name: impl Into<String>,
        target: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            column: column.into(),
            kind: RelationKind::Many,
        }
    }
}

fn default_primary_key() -> String {
    "id".to_string()
}

/// Metadata for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Model name
    pub name: String,
    /// Identity column (defaults to `id`)
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Relation fields declared on this model
    #[serde(default)]
    pub relations: Vec<RelationField>,
    /// Explicitly declared dependency model names
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ModelMeta {
    /// Creates metadata with the default `id` primary key and no relations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: default_primary_key(),
            relations: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the primary key column
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Adds a relation field
    pub fn relation(mut self, relation: RelationField) -> Self {
        self.relations.push(relation);
        self
    }

    /// Adds an explicit dependency
    pub fn depends_on(mut self, model: impl Into<String>) -> Self {
        self.dependencies.push(model.into());
        self
    }

    /// Looks up a relation field by name
    pub fn relation_named(&self, name: &str) -> Option<&RelationField> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Dependency edges for ordering: explicit dependencies plus the target
    /// of every forward relation, excluding self-references. Reverse and
    /// multi-valued relations constrain the other model, not this one.
    pub fn dependency_edges(&self) -> Vec<&str> {
        let mut edges: Vec<&str> = Vec::new();
        for dep in &self.dependencies {
            if dep != &self.name && !edges.contains(&dep.as_str()) {
                edges.push(dep);
            }
        }
        for relation in &self.relations {
            if relation.kind == RelationKind::ForwardOne
                && relation.target != self.name
                && !edges.contains(&relation.target.as_str())
            {
                edges.push(&relation.target);
            }
        }
        edges
    }
}

/// Insertion-ordered registry of model metadata
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<ModelMeta>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model; re-registering a name replaces its metadata
    pub fn register(&mut self, meta: ModelMeta) {
        if let Some(&pos) = self.index.get(&meta.name) {
            self.models[pos] = meta;
        } else {
            self.index.insert(meta.name.clone(), self.models.len());
            self.models.push(meta);
        }
    }

    /// Looks up a model by name
    pub fn get(&self, name: &str) -> Option<&ModelMeta> {
        self.index.get(name).map(|&pos| &self.models[pos])
    }

    /// Looks up a model by name, failing on an unknown name
    pub fn require(&self, name: &str) -> ModelResult<&ModelMeta> {
        self.get(name)
            .ok_or_else(|| ModelError::UnknownModel(name.to_string()))
    }

    /// All registered models in registration order
    pub fn models(&self) -> &[ModelMeta] {
        &self.models
    }

    /// Registered model names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}
