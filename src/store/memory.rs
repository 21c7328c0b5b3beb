//! In-memory reference store
//!
//! Applies a [`QuerySpec`] against rows held in memory: predicate filtering
//! with strict AND semantics, stable sort, offset, then limit. Backs the CLI
//! and the test suites; it is also the executable definition of what a
//! conforming store must do.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use super::compare::compare_values;
use super::errors::{StoreError, StoreResult};
use super::query::{FilterOp, Predicate, QuerySpec, SortDirection};
use super::record::Record;
use super::Store;

/// A store over in-memory rows, keyed by model name
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: HashMap<String, Vec<Record>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model with its rows (insertion order is preserved)
    pub fn insert_model(&mut self, model: impl Into<String>, bodies: Vec<Value>) {
        let model = model.into();
        let records = bodies
            .into_iter()
            .map(|body| Record::new(model.clone(), body))
            .collect();
        self.rows.insert(model, records);
    }

    /// Returns the number of rows held for a model
    pub fn len_of(&self, model: &str) -> usize {
        self.rows.get(model).map_or(0, Vec::len)
    }

    /// Checks if a record matches all predicates (AND semantics)
    fn matches(record: &Record, predicates: &[Predicate]) -> bool {
        predicates.iter().all(|pred| {
            let field_value = match record.field(&pred.column) {
                Some(v) => v,
                None => return false,
            };

            match &pred.op {
                FilterOp::Eq(expected) => field_value == expected,
                FilterOp::Gte(bound) => {
                    compare_values(Some(field_value), Some(bound)) != Ordering::Less
                }
                FilterOp::Lte(bound) => {
                    compare_values(Some(field_value), Some(bound)) != Ordering::Greater
                }
                FilterOp::In(values) => values.contains(field_value),
            }
        })
    }
}

impl Store for MemoryStore {
    fn execute(&self, query: &QuerySpec) -> StoreResult<Vec<Record>> {
        let rows = self
            .rows
            .get(&query.model)
            .ok_or_else(|| StoreError::UnknownModel(query.model.clone()))?;

        // A sort column no row carries is a query mistake, not an empty
        // ordering; predicate columns stay lenient (missing field = no match).
        if let Some(sort) = &query.sort {
            let known = rows.iter().any(|r| r.body.get(&sort.column).is_some());
            if !rows.is_empty() && !known {
                return Err(StoreError::UnknownColumn {
                    model: query.model.clone(),
                    column: sort.column.clone(),
                });
            }
        }

        let mut results: Vec<Record> = rows
            .iter()
            .filter(|r| Self::matches(r, &query.predicates))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among ties
        if let Some(sort) = &query.sort {
            results.sort_by(|a, b| {
                let ordering = compare_values(a.field(&sort.column), b.field(&sort.column));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let offset = query.offset as usize;
        if offset > 0 {
            if offset >= results.len() {
                return Ok(Vec::new());
            }
            results.drain(..offset);
        }

        if let Some(limit) = query.limit {
            results.truncate(limit as usize);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Predicate, SortSpec};
    use serde_json::json;

    fn store_with_ids(ids: &[i64]) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_model(
            "item",
            ids.iter().map(|id| json!({"id": id})).collect(),
        );
        store
    }

    fn ids_of(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.field("id").and_then(Value::as_i64).unwrap())
            .collect()
    }

    #[test]
    fn test_filter_sort_limit_offset() {
        let store = store_with_ids(&[5, 1, 3, 2, 4]);
        let query = QuerySpec::all("item")
            .filter(Predicate::gte("id", json!(2)))
            .order_by(SortSpec::asc("id"))
            .offset(1)
            .limit(2);

        let results = store.execute(&query).unwrap();
        assert_eq!(ids_of(&results), vec![3, 4]);
    }

    #[test]
    fn test_descending_sort() {
        let store = store_with_ids(&[1, 2, 3]);
        let query = QuerySpec::all("item").order_by(SortSpec::desc("id"));
        assert_eq!(ids_of(&store.execute(&query).unwrap()), vec![3, 2, 1]);
    }

    #[test]
    fn test_in_predicate() {
        let store = store_with_ids(&[1, 2, 3, 4]);
        let query =
            QuerySpec::all("item").filter(Predicate::is_in("id", vec![json!(2), json!(4)]));
        assert_eq!(ids_of(&store.execute(&query).unwrap()), vec![2, 4]);
    }

    #[test]
    fn test_unknown_model_errors() {
        let store = MemoryStore::new();
        let err = store.execute(&QuerySpec::all("ghost")).unwrap_err();
        assert!(matches!(err, StoreError::UnknownModel(m) if m == "ghost"));
    }

    #[test]
    fn test_unknown_sort_column_errors() {
        let store = store_with_ids(&[1, 2]);
        let query = QuerySpec::all("item").order_by(SortSpec::asc("ghost"));
        let err = store.execute(&query).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownColumn { model, column } if model == "item" && column == "ghost"
        ));
    }

    #[test]
    fn test_sort_on_empty_model_is_fine() {
        let store = store_with_ids(&[]);
        let query = QuerySpec::all("item").order_by(SortSpec::asc("ghost"));
        assert!(store.execute(&query).unwrap().is_empty());
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let store = store_with_ids(&[1, 2]);
        let query = QuerySpec::all("item").offset(5);
        assert!(store.execute(&query).unwrap().is_empty());
    }

    #[test]
    fn test_stable_order_among_ties() {
        let mut store = MemoryStore::new();
        store.insert_model(
            "item",
            vec![
                json!({"id": 1, "rank": 7}),
                json!({"id": 2, "rank": 7}),
                json!({"id": 3, "rank": 7}),
            ],
        );
        let query = QuerySpec::all("item").order_by(SortSpec::asc("rank"));
        assert_eq!(ids_of(&store.execute(&query).unwrap()), vec![1, 2, 3]);
    }
}
