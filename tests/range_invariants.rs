//! Range Iterator Invariant Tests
//!
//! End-to-end traversal invariants over the in-memory store:
//! - Chunk concatenation equals the full ordered collection
//! - Every record is yielded exactly once, ties included
//! - Limits and bounds are honored in both directions
//! - Re-iteration over an unmodified store is idempotent

use datapump::model::{ModelMeta, ModelRegistry};
use datapump::range::{RangeIterator, RangeOptions};
use datapump::store::{MemoryStore, QuerySpec};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup(ids: &[i64]) -> (ModelRegistry, MemoryStore) {
    let mut registry = ModelRegistry::new();
    registry.register(ModelMeta::new("item"));

    let mut store = MemoryStore::new();
    store.insert_model("item", ids.iter().map(|id| json!({"id": id})).collect());
    (registry, store)
}

fn traverse(registry: &ModelRegistry, store: &MemoryStore, options: RangeOptions) -> Vec<i64> {
    let mut range = RangeIterator::new(QuerySpec::all("item"), options, registry).unwrap();
    range
        .iter(store)
        .map(|r| r.unwrap().field("id").and_then(Value::as_i64).unwrap())
        .collect()
}

// =============================================================================
// Full-Coverage Invariants
// =============================================================================

/// For every step size, ascending traversal equals the sorted collection.
#[test]
fn test_concatenated_chunks_equal_collection_for_all_steps() {
    let ids = [9, 2, 7, 1, 8, 3, 6];
    let (registry, store) = setup(&ids);

    let mut expected: Vec<i64> = ids.to_vec();
    expected.sort_unstable();

    for step in 1..=8 {
        assert_eq!(
            traverse(&registry, &store, RangeOptions::step(step)),
            expected,
            "step {}",
            step
        );
    }
}

/// Descending traversal mirrors ascending for every step size.
#[test]
fn test_descending_traversal_for_all_steps() {
    let ids = [4, 1, 3, 2, 5];
    let (registry, store) = setup(&ids);

    let mut expected: Vec<i64> = ids.to_vec();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    for step in 1..=6 {
        assert_eq!(
            traverse(&registry, &store, RangeOptions::step(-step)),
            expected,
            "step {}",
            step
        );
    }
}

/// Limit L yields exactly min(L, collection size) records.
#[test]
fn test_limit_yields_min_of_limit_and_size() {
    let (registry, store) = setup(&[1, 2, 3, 4, 5]);

    for limit in 0..=7 {
        let got = traverse(&registry, &store, RangeOptions::step(2).limit(limit));
        assert_eq!(got.len() as u64, limit.min(5), "limit {}", limit);
    }
}

// =============================================================================
// Ties on a Non-Unique Ordering Column
// =============================================================================

/// Duplicate ordering values are yielded exactly once regardless of step,
/// including a tie-run longer than the window size.
#[test]
fn test_ties_exact_once_for_all_steps() {
    let mut registry = ModelRegistry::new();
    registry.register(ModelMeta::new("item"));

    let mut store = MemoryStore::new();
    // Ranks: 1, then five 2s, then 3; the run of 2s exceeds small steps
    let rows: Vec<Value> = [(1, 1), (2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (7, 3)]
        .iter()
        .map(|(id, rank)| json!({"id": id, "rank": rank}))
        .collect();
    store.insert_model("item", rows);

    for step in 1..=8 {
        let mut range = RangeIterator::new(
            QuerySpec::all("item"),
            RangeOptions::step(step).order_column("rank"),
            &registry,
        )
        .unwrap();
        let ids: Vec<i64> = range
            .iter(&store)
            .map(|r| r.unwrap().field("id").and_then(Value::as_i64).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7], "step {}", step);
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// With max_bound M, no yielded value passes M in the traversal direction.
#[test]
fn test_max_bound_is_inclusive_ceiling() {
    let (registry, store) = setup(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let ascending = traverse(
        &registry,
        &store,
        RangeOptions::step(4).max_bound(json!(6)),
    );
    assert_eq!(ascending, vec![1, 2, 3, 4, 5, 6]);

    let descending = traverse(
        &registry,
        &store,
        RangeOptions::step(-4).max_bound(json!(6)),
    );
    assert_eq!(descending, vec![9, 8, 7, 6]);
}

/// min_bound starts the traversal at the boundary, inclusive.
#[test]
fn test_min_bound_starts_traversal() {
    let (registry, store) = setup(&[1, 2, 3, 4, 5]);

    let got = traverse(
        &registry,
        &store,
        RangeOptions::step(2).min_bound(json!(3)),
    );
    assert_eq!(got, vec![3, 4, 5]);
}

// =============================================================================
// Idempotence
// =============================================================================

/// Re-running over an unmodified collection yields the same sequence.
#[test]
fn test_reiteration_is_idempotent() {
    let (registry, store) = setup(&[5, 3, 8, 1]);
    let mut range =
        RangeIterator::new(QuerySpec::all("item"), RangeOptions::step(3), &registry).unwrap();

    let runs: Vec<Vec<i64>> = (0..3)
        .map(|_| {
            range
                .iter(&store)
                .map(|r| r.unwrap().field("id").and_then(Value::as_i64).unwrap())
                .collect()
        })
        .collect();

    assert_eq!(runs[0], vec![1, 3, 5, 8]);
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
