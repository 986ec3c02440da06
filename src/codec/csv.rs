//! Tabular codec backed by the csv crate
//!
//! The first row is always treated as the header; every following row
//! becomes an object keyed by header. Cell values are kept as raw strings
//! with no numeric or boolean coercion, so `30` parses as `"30"`.

use csv::{ReaderBuilder, WriterBuilder};
use serde_json::{Map, Value};

use super::{type_name, Codec, Format};
use crate::error::{FormatParseError, FormatSerializeError};

/// CSV codec
pub struct CsvCodec;

impl Codec for CsvCodec {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn parse(&self, raw: &str) -> Result<Value, FormatParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(raw.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| FormatParseError::new(Format::Csv, e.to_string()))?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| FormatParseError::new(Format::Csv, e.to_string()))?;
            let mut row = Map::new();
            for (i, field) in record.iter().enumerate() {
                // Fields beyond the header width have no key and are dropped.
                if let Some(key) = headers.get(i) {
                    row.insert(key.to_string(), Value::String(field.to_string()));
                }
            }
            rows.push(Value::Object(row));
        }

        Ok(Value::Array(rows))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError> {
        let rows = value.as_array().ok_or_else(|| {
            FormatSerializeError::new(
                Format::Csv,
                format!(
                    "csv requires an array of objects at the top level, found {}",
                    type_name(value)
                ),
            )
        })?;

        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        // Header comes from the first row's keys in insertion order; later
        // rows are projected onto it, missing fields become empty cells.
        let mut headers: Vec<String> = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_object().ok_or_else(|| {
                FormatSerializeError::new(
                    Format::Csv,
                    format!("row {} is not an object ({})", index, type_name(row)),
                )
            })?;

            if headers.is_empty() {
                headers = row.keys().cloned().collect();
                writer
                    .write_record(&headers)
                    .map_err(|e| FormatSerializeError::new(Format::Csv, e.to_string()))?;
            }

            let fields: Vec<String> = headers
                .iter()
                .map(|key| row.get(key).map(cell_text).unwrap_or_default())
                .collect();
            writer
                .write_record(&fields)
                .map_err(|e| FormatSerializeError::new(Format::Csv, e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FormatSerializeError::new(Format::Csv, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FormatSerializeError::new(Format::Csv, e.to_string()))
    }
}

/// Printed form of a single cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested structures are flattened to compact JSON in their cell.
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_values_as_strings() {
        let value = CsvCodec.parse("name,age\nAda,30").unwrap();
        assert_eq!(value, json!([{"name": "Ada", "age": "30"}]));
    }

    #[test]
    fn test_parse_multiple_rows() {
        let value = CsvCodec.parse("id,city\n1,London\n2,Paris\n").unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["city"], json!("Paris"));
    }

    #[test]
    fn test_serialize_array_of_objects() {
        let value = json!([
            {"name": "Ada", "age": "30"},
            {"name": "Bob", "age": "41"}
        ]);
        let text = CsvCodec.serialize(&value).unwrap();
        assert!(text.starts_with("name,age\n"));
        assert!(text.contains("Ada,30"));
        assert!(text.contains("Bob,41"));
    }

    #[test]
    fn test_serialize_rejects_object_root() {
        let err = CsvCodec.serialize(&json!({"a": 1})).unwrap_err();
        assert!(err.message.contains("array of objects"));
    }

    #[test]
    fn test_serialize_missing_fields_become_empty() {
        let value = json!([{"a": "1", "b": "2"}, {"a": "3"}]);
        let text = CsvCodec.serialize(&value).unwrap();
        assert!(text.contains("3,"));
    }
}
