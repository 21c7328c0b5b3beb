//! Join-attachment helper
//!
//! Resolves a relation field for a whole batch in one store round trip
//! instead of one query per record: collect the distinct non-null join
//! values, fetch all matching targets with a single `In` query, build a
//! key-to-record map, then write each record's attachment slot (target or
//! absent marker). Records whose slot is already resolved are skipped unless
//! a deeper nested path was requested.

use std::collections::HashMap;

use serde_json::Value;

use crate::model::{ModelError, ModelRegistry, ModelResult, RelationField, RelationKind};
use crate::store::{Predicate, QuerySpec, Record, Store, StoreResult};

/// A relation path requested for eager attachment.
///
/// The text form joins field names with `__`: `"author"` attaches the
/// `author` relation, `"author__publisher"` additionally attaches
/// `publisher` onto each fetched author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachSpec {
    /// Relation field names, outermost first
    pub path: Vec<String>,
}

impl AttachSpec {
    /// Parses the `field__nested__...` text form
    pub fn parse(path: &str) -> Self {
        Self {
            path: path.split("__").map(str::to_string).collect(),
        }
    }

    /// Single-field spec with no nesting
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
        }
    }
}

/// A relation path resolved against the registry, ready to execute
#[derive(Debug, Clone)]
pub struct RelationPlan {
    /// The relation being attached
    pub relation: RelationField,
    /// Primary key column of the source model
    pub source_pk: String,
    /// Primary key column of the target model
    pub target_pk: String,
    /// Relations to attach onto the fetched targets
    pub nested: Vec<RelationPlan>,
}

/// Resolves an attachment path against the registry.
///
/// Fails on an unknown model, an unknown relation field, or a multi-valued
/// relation (only single-valued relations can be attached).
pub fn resolve_spec(
    registry: &ModelRegistry,
    model: &str,
    spec: &AttachSpec,
) -> ModelResult<RelationPlan> {
    resolve_path(registry, model, &spec.path)
}

fn resolve_path(
    registry: &ModelRegistry,
    model: &str,
    path: &[String],
) -> ModelResult<RelationPlan> {
    let meta = registry.require(model)?;
    let field = &path[0];
    let relation = meta
        .relation_named(field)
        .filter(|r| r.kind != RelationKind::Many)
        .ok_or_else(|| ModelError::UnknownRelation {
            model: model.to_string(),
            relation: field.clone(),
        })?
        .clone();

    let target_meta = registry.require(&relation.target)?;
    let nested = if path.len() > 1 {
        vec![resolve_path(registry, &relation.target, &path[1..])?]
    } else {
        Vec::new()
    };

    Ok(RelationPlan {
        source_pk: meta.primary_key.clone(),
        target_pk: target_meta.primary_key.clone(),
        relation,
        nested,
    })
}

/// Attaches a resolved relation across a batch of records.
///
/// No-op on an empty batch. Issues at most one fetch for this relation plus
/// one per nested relation.
pub fn attach_relation<S: Store + ?Sized>(
    store: &S,
    batch: &mut [Record],
    plan: &RelationPlan,
) -> StoreResult<()> {
    if batch.is_empty() {
        return Ok(());
    }

    let name = plan.relation.name.as_str();
    let deep = !plan.nested.is_empty();

    // Join value on the source side: the FK column for a forward relation,
    // the source's own primary key for a reverse one.
    let source_column = match plan.relation.kind {
        RelationKind::ForwardOne => plan.relation.column.as_str(),
        RelationKind::ReverseOne => plan.source_pk.as_str(),
        RelationKind::Many => return Ok(()),
    };
    // Key on the target side, symmetric to the above.
    let target_column = match plan.relation.kind {
        RelationKind::ForwardOne => plan.target_pk.as_str(),
        RelationKind::ReverseOne => plan.relation.column.as_str(),
        RelationKind::Many => return Ok(()),
    };

    let candidates: Vec<usize> = batch
        .iter()
        .enumerate()
        .filter(|(_, r)| deep || !r.has_attached(name))
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }

    // Distinct non-null join values, first-seen order for determinism
    let mut values: Vec<Value> = Vec::new();
    for &i in &candidates {
        if let Some(v) = batch[i].field(source_column) {
            if !values.contains(v) {
                values.push(v.clone());
            }
        }
    }

    let lookup = if values.is_empty() {
        HashMap::new()
    } else {
        let query = QuerySpec::all(plan.relation.target.clone())
            .filter(Predicate::is_in(target_column, values));
        let mut targets = store.execute(&query)?;

        for nested in &plan.nested {
            attach_relation(store, &mut targets, nested)?;
        }

        let mut lookup: HashMap<String, Record> = HashMap::new();
        for target in targets {
            if let Some(key) = target.field(target_column) {
                // First match wins, mirroring a left outer join on a unique key
                lookup.entry(key.to_string()).or_insert(target);
            }
        }
        lookup
    };

    for i in candidates {
        let found = batch[i]
            .field(source_column)
            .map(Value::to_string)
            .and_then(|key| lookup.get(&key).cloned());
        batch[i].set_attached(name.to_string(), found);
    }

    Ok(())
}
