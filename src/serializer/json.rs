//! JSON array format
//!
//! The whole dump as one JSON array of fixture objects, optionally
//! pretty-printed with a caller-chosen indent width.

use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer as JsonValueSerializer, Value};

use serde::Serialize;

use crate::model::ModelRegistry;
use crate::store::Record;

use super::errors::SerializeResult;
use super::{fixture_object, Serializer};

/// Serializes a dump as a single JSON array
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn serialize(
        &self,
        records: &[Record],
        registry: &ModelRegistry,
        indent: Option<u16>,
    ) -> SerializeResult<String> {
        let fixtures: Vec<Value> = records
            .iter()
            .map(|record| fixture_object(record, registry))
            .collect();

        let text = match indent {
            Some(width) => {
                let spaces = vec![b' '; width as usize];
                let formatter = PrettyFormatter::with_indent(&spaces);
                let mut out = Vec::new();
                let mut ser = JsonValueSerializer::with_formatter(&mut out, formatter);
                fixtures.serialize(&mut ser)?;
                // serde_json only emits valid UTF-8
                String::from_utf8_lossy(&out).into_owned()
            }
            None => serde_json::to_string(&fixtures)?,
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelMeta;
    use serde_json::json;

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(ModelMeta::new("author"));
        registry
    }

    #[test]
    fn test_compact_array_output() {
        let records = vec![Record::new("author", json!({"id": 1, "name": "ada"}))];
        let text = JsonSerializer
            .serialize(&records, &registry(), None)
            .unwrap();

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed,
            json!([{"model": "author", "pk": 1, "fields": {"id": 1, "name": "ada"}}])
        );
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_indented_output_parses_back() {
        let records = vec![Record::new("author", json!({"id": 2}))];
        let text = JsonSerializer
            .serialize(&records, &registry(), Some(2))
            .unwrap();

        assert!(text.contains('\n'));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["pk"], json!(2));
    }

    #[test]
    fn test_empty_dump_is_empty_array() {
        let text = JsonSerializer.serialize(&[], &registry(), None).unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn test_unregistered_model_gets_null_pk() {
        let records = vec![Record::new("ghost", json!({"uid": 1}))];
        let text = JsonSerializer
            .serialize(&records, &registry(), None)
            .unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["pk"], Value::Null);
    }
}
