//! Dump Pipeline Tests
//!
//! End-to-end runs from a dataset file to serialized output:
//! - Referenced models serialize before the models referencing them
//! - Relative record order within a model is preserved
//! - Unknown model and format names fail with descriptive errors
//! - The CLI command writes the same output to a file

use std::fs;

use datapump::cli::{run_command, CliError, Command, SortArg};
use datapump::deps::SortError;
use datapump::dump::{DumpError, DumpJob, DumpOptions};
use datapump::model::ModelError;
use datapump::serializer::SerializeError;
use datapump::store::Dataset;
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const BLOG_DATASET: &str = r#"{
    "models": [
        {"name": "author"},
        {"name": "post", "relations": [
            {"name": "author", "target": "author",
             "column": "author_id", "kind": "forward_one"}
        ]},
        {"name": "comment", "relations": [
            {"name": "post", "target": "post",
             "column": "post_id", "kind": "forward_one"},
            {"name": "author", "target": "author",
             "column": "author_id", "kind": "forward_one"}
        ]}
    ],
    "records": {
        "author": [{"id": 1, "name": "ada"}, {"id": 2, "name": "brian"}],
        "post": [
            {"id": 10, "author_id": 1},
            {"id": 11, "author_id": 2},
            {"id": 12, "author_id": 1}
        ],
        "comment": [{"id": 20, "post_id": 10, "author_id": 2}]
    }
}"#;

fn fixtures(output: &str) -> Vec<(String, i64)> {
    let parsed: Value = serde_json::from_str(output).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["model"].as_str().unwrap().to_string(),
                f["pk"].as_i64().unwrap(),
            )
        })
        .collect()
}

// =============================================================================
// Ordering
// =============================================================================

/// Every referenced model's records precede the records referencing them.
#[test]
fn test_dependency_order_across_models() {
    let (registry, store) = Dataset::from_json(BLOG_DATASET).unwrap().into_parts();
    let output = DumpJob::new(&store, &registry)
        .run(&DumpOptions::default())
        .unwrap();

    let dumped = fixtures(&output);
    let index_of = |model: &str, pk: i64| {
        dumped
            .iter()
            .position(|(m, p)| m == model && *p == pk)
            .unwrap()
    };

    for (post, author) in [(10, 1), (11, 2), (12, 1)] {
        assert!(index_of("author", author) < index_of("post", post));
    }
    assert!(index_of("post", 10) < index_of("comment", 20));
    assert!(index_of("author", 2) < index_of("comment", 20));
}

/// Input order within a model survives the sort.
#[test]
fn test_intra_model_order_preserved() {
    let (registry, store) = Dataset::from_json(BLOG_DATASET).unwrap().into_parts();
    let output = DumpJob::new(&store, &registry)
        .run(&DumpOptions::default())
        .unwrap();

    let post_pks: Vec<i64> = fixtures(&output)
        .into_iter()
        .filter(|(m, _)| m == "post")
        .map(|(_, pk)| pk)
        .collect();
    assert_eq!(post_pks, vec![10, 11, 12]);
}

/// Selecting only posts still pulls their authors via the relation walk.
#[test]
fn test_selection_pulls_referenced_records() {
    let (registry, store) = Dataset::from_json(BLOG_DATASET).unwrap().into_parts();
    let options = DumpOptions {
        models: vec!["post".to_string()],
        ..DumpOptions::default()
    };
    let output = DumpJob::new(&store, &registry).run(&options).unwrap();

    let dumped = fixtures(&output);
    assert!(dumped.contains(&("author".to_string(), 1)));
    assert!(dumped.contains(&("author".to_string(), 2)));
    assert_eq!(dumped.iter().filter(|(m, _)| m == "post").count(), 3);
    // Comments reference posts, not the other way around: not pulled
    assert!(!dumped.iter().any(|(m, _)| m == "comment"));
}

// =============================================================================
// Failure Modes
// =============================================================================

#[test]
fn test_unknown_model_name_fails() {
    let (registry, store) = Dataset::from_json(BLOG_DATASET).unwrap().into_parts();
    let options = DumpOptions {
        models: vec!["reader".to_string()],
        ..DumpOptions::default()
    };

    let err = DumpJob::new(&store, &registry).run(&options).unwrap_err();
    assert!(matches!(
        err,
        DumpError::Model(ModelError::UnknownModel(name)) if name == "reader"
    ));
}

#[test]
fn test_unknown_format_name_fails() {
    let (registry, store) = Dataset::from_json(BLOG_DATASET).unwrap().into_parts();
    let options = DumpOptions {
        format: "yaml".to_string(),
        ..DumpOptions::default()
    };

    let err = DumpJob::new(&store, &registry).run(&options).unwrap_err();
    assert!(matches!(
        err,
        DumpError::Serialize(SerializeError::UnknownFormat(name)) if name == "yaml"
    ));
}

#[test]
fn test_circular_dependencies_fail_with_sorted_names() {
    let dataset = r#"{
        "models": [
            {"name": "b", "dependencies": ["a"]},
            {"name": "a", "dependencies": ["b"]}
        ],
        "records": {"a": [{"id": 1}], "b": [{"id": 1}]}
    }"#;
    let (registry, store) = Dataset::from_json(dataset).unwrap().into_parts();

    let err = DumpJob::new(&store, &registry)
        .run(&DumpOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        DumpError::Sort(SortError::CircularDependency { models }) if models == vec!["a", "b"]
    ));
}

// =============================================================================
// CLI Command
// =============================================================================

#[test]
fn test_cli_dump_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    let data_path = tmp.path().join("blog.json");
    let out_path = tmp.path().join("dump.json");
    fs::write(&data_path, BLOG_DATASET).unwrap();

    run_command(Command::Dump {
        models: Vec::new(),
        data: data_path,
        format: "json".to_string(),
        indent: Some(2),
        exclude: Vec::new(),
        limit: None,
        sort: SortArg::Asc,
        step: 2,
        no_follow: false,
        output: Some(out_path.clone()),
    })
    .unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    let dumped = fixtures(&written);
    assert_eq!(dumped.len(), 6);
    assert_eq!(dumped[0].0, "author");
}

#[test]
fn test_cli_unreadable_dataset_fails() {
    let tmp = TempDir::new().unwrap();
    let err = run_command(Command::Models {
        data: tmp.path().join("missing.json"),
    })
    .unwrap_err();
    assert!(matches!(err, CliError::DatasetRead { .. }));
}
