//! JSON Lines format
//!
//! One compact fixture object per line. Indent does not apply; a line must
//! stay a line.

use crate::model::ModelRegistry;
use crate::store::Record;

use super::errors::SerializeResult;
use super::{fixture_object, Serializer};

/// Serializes a dump as one JSON object per line
pub struct JsonLinesSerializer;

impl Serializer for JsonLinesSerializer {
    fn format_name(&self) -> &'static str {
        "jsonl"
    }

    fn serialize(
        &self,
        records: &[Record],
        registry: &ModelRegistry,
        _indent: Option<u16>,
    ) -> SerializeResult<String> {
        let mut output = String::new();
        for record in records {
            let line = serde_json::to_string(&fixture_object(record, registry))?;
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }
}
