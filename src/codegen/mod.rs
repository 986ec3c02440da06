//! Shallow type inference and code/schema generation
//!
//! Inference is intentionally one level deep: each top-level key is mapped
//! through a fixed per-target table keyed on the value's runtime tag, and
//! nested objects or arrays are never expanded into their own definitions.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde_json::{json, Map, Value};

use crate::codec::type_name;
use crate::error::GenerateError;

/// Generation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodeTarget {
    /// TypeScript interface fields
    Typescript,
    /// Go struct fields
    Golang,
    /// Rust struct fields
    Rust,
    /// JSON Schema document
    JsonSchema,
}

impl fmt::Display for CodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeTarget::Typescript => "typescript",
            CodeTarget::Golang => "golang",
            CodeTarget::Rust => "rust",
            CodeTarget::JsonSchema => "jsonschema",
        };
        f.write_str(name)
    }
}

impl FromStr for CodeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(CodeTarget::Typescript),
            "golang" | "go" => Ok(CodeTarget::Golang),
            "rust" => Ok(CodeTarget::Rust),
            "jsonschema" | "json-schema" => Ok(CodeTarget::JsonSchema),
            other => Err(format!("unsupported code target: {other}")),
        }
    }
}

/// Generate code or schema text for a document value.
///
/// The top level must be an object; one line (or schema property) is emitted
/// per key in insertion order.
pub fn generate_code(value: &Value, target: CodeTarget) -> Result<String, GenerateError> {
    let object = value
        .as_object()
        .ok_or_else(|| GenerateError::new(type_name(value)))?;

    match target {
        CodeTarget::Typescript => Ok(field_lines(object, |key, value| {
            format!("  {}: {};", key, pick(value, "number", "string"))
        })),
        CodeTarget::Golang => Ok(field_lines(object, |key, value| {
            format!("  {} {}", key, pick(value, "int", "string"))
        })),
        CodeTarget::Rust => Ok(field_lines(object, |key, value| {
            format!("  {}: {},", key, pick(value, "i64", "String"))
        })),
        CodeTarget::JsonSchema => {
            let mut properties = Map::new();
            for (key, child) in object {
                properties.insert(key.clone(), json!({ "type": type_name(child) }));
            }
            let schema = json!({
                "type": "object",
                "properties": properties
            });
            serde_json::to_string_pretty(&schema).map_err(|e| GenerateError::new(e.to_string()))
        }
    }
}

/// Generate a JSON Schema for a document value.
pub fn generate_schema(value: &Value) -> Result<String, GenerateError> {
    generate_code(value, CodeTarget::JsonSchema)
}

/// The one-level inference table: numbers map to the target's numeric type,
/// everything else to its string type.
fn pick<'a>(value: &Value, numeric: &'a str, stringy: &'a str) -> &'a str {
    if value.is_number() {
        numeric
    } else {
        stringy
    }
}

fn field_lines(object: &Map<String, Value>, line: impl Fn(&str, &Value) -> String) -> String {
    object
        .iter()
        .map(|(key, value)| line(key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
