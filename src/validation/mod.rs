//! Input validation and schema checking
//!
//! `validate_and_beautify` checks raw text against its declared format and,
//! when valid, returns the re-serialized (beautified) text.
//! `validate_against_schema` structurally checks a document against the
//! shallow schemas produced by the generator: a `type` tag plus optional
//! `properties`/`items`.

use serde_json::Value;

use crate::codec::{type_name, CodecRegistry, Format};
use crate::error::{SchemaValidationError, ValidationResult};

/// Parse then re-serialize the input in its own format.
pub fn validate_and_beautify(
    registry: &CodecRegistry,
    raw: &str,
    format: Format,
) -> ValidationResult {
    let value = match registry.parse(raw, format) {
        Ok(value) => value,
        Err(e) => return ValidationResult::failed(format!("Error: {e}")),
    };
    match registry.serialize(&value, format) {
        Ok(beautified) => ValidationResult::ok(beautified),
        Err(e) => ValidationResult::failed(format!("Error: {e}")),
    }
}

/// Check a document against a schema, collecting every mismatch.
pub fn validate_against_schema(
    value: &Value,
    schema: &Value,
) -> Result<(), SchemaValidationError> {
    let mut mismatches = Vec::new();
    check(value, schema, "$", &mut mismatches);
    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::new(mismatches.join("; ")))
    }
}

fn check(value: &Value, schema: &Value, path: &str, mismatches: &mut Vec<String>) {
    let Some(schema) = schema.as_object() else {
        mismatches.push(format!("{path}: schema is not an object"));
        return;
    };

    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        let actual = type_name(value);
        if expected != actual {
            mismatches.push(format!("{path}: expected {expected}, found {actual}"));
            return;
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        let Some(object) = value.as_object() else {
            return;
        };
        for (key, child_schema) in properties {
            match object.get(key) {
                Some(child) => check(child, child_schema, &format!("{path}.{key}"), mismatches),
                None => mismatches.push(format!("{path}: missing property {key}")),
            }
        }
    }

    if let Some(item_schema) = schema.get("items") {
        if let Some(items) = value.as_array() {
            for (index, item) in items.iter().enumerate() {
                check(item, item_schema, &format!("{path}[{index}]"), mismatches);
            }
        }
    }
}
