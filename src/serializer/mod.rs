//! Output serialization
//!
//! A dump is serialized as a sequence of fixture objects, one per record:
//!
//! ```json
//! {"model": "post", "pk": 1, "fields": {"id": 1, "author_id": 7}}
//! ```
//!
//! Formats are selected by name; an unknown name fails before any records
//! are collected so the caller can abort early.

mod errors;
mod json;
mod jsonl;

pub use errors::{SerializeError, SerializeResult};
pub use json::JsonSerializer;
pub use jsonl::JsonLinesSerializer;

use serde_json::{json, Map, Value};

use crate::model::ModelRegistry;
use crate::store::Record;

/// A named output format
pub trait Serializer {
    /// The name this format is selected by
    fn format_name(&self) -> &'static str;

    /// Serializes an ordered record sequence into output text
    fn serialize(
        &self,
        records: &[Record],
        registry: &ModelRegistry,
        indent: Option<u16>,
    ) -> SerializeResult<String>;
}

/// Resolves a format name to a serializer.
///
/// Known formats: `json`, `jsonl`.
pub fn for_format(name: &str) -> SerializeResult<Box<dyn Serializer>> {
    match name {
        "json" => Ok(Box::new(JsonSerializer)),
        "jsonl" => Ok(Box::new(JsonLinesSerializer)),
        other => Err(SerializeError::UnknownFormat(other.to_string())),
    }
}

/// Registered format names, listed in unknown-format errors
pub fn format_names() -> &'static [&'static str] {
    &["json", "jsonl"]
}

/// Builds the fixture object for one record
pub(crate) fn fixture_object(record: &Record, registry: &ModelRegistry) -> Value {
    let pk_column = registry
        .get(&record.model)
        .map_or("id", |meta| meta.primary_key.as_str());
    let pk = record.field(pk_column).cloned().unwrap_or(Value::Null);

    let mut object = Map::new();
    object.insert("model".to_string(), json!(record.model));
    object.insert("pk".to_string(), pk);
    object.insert("fields".to_string(), record.body.clone());
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_formats_resolve() {
        assert_eq!(for_format("json").unwrap().format_name(), "json");
        assert_eq!(for_format("jsonl").unwrap().format_name(), "jsonl");
    }

    #[test]
    fn test_unknown_format_fails() {
        let err = for_format("xml").err().unwrap();
        assert!(matches!(&err, SerializeError::UnknownFormat(name) if name == "xml"));
        assert_eq!(
            err.to_string(),
            "unknown serialization format: xml; expected one of: json, jsonl"
        );
    }

    #[test]
    fn test_format_names_cover_registry() {
        for name in format_names() {
            assert!(for_format(name).is_ok());
        }
    }
}
