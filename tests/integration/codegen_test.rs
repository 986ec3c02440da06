//! Integration tests for code and schema generation
//!
//! The inference is one level deep and driven by a fixed per-target table;
//! key order in every artifact follows the document's insertion order.

use jsonviz::codegen::{generate_code, generate_schema, CodeTarget};
use jsonviz::session::Session;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_typescript_two_line_example() {
    let value = json!({"a": 1, "b": "x"});
    let code = generate_code(&value, CodeTarget::Typescript).unwrap();
    assert_eq!(code, "  a: number;\n  b: string;");
}

#[test]
fn test_target_tables_agree_on_numbers() {
    let value = json!({"n": 3.5});
    assert_eq!(
        generate_code(&value, CodeTarget::Typescript).unwrap(),
        "  n: number;"
    );
    assert_eq!(generate_code(&value, CodeTarget::Golang).unwrap(), "  n int");
    assert_eq!(generate_code(&value, CodeTarget::Rust).unwrap(), "  n: i64,");
}

#[test]
fn test_everything_else_maps_to_string_types() {
    let value = json!({"b": true, "z": null, "o": {"x": 1}, "a": [1]});
    assert_eq!(
        generate_code(&value, CodeTarget::Golang).unwrap(),
        "  b string\n  z string\n  o string\n  a string"
    );
    assert_eq!(
        generate_code(&value, CodeTarget::Rust).unwrap(),
        "  b: String,\n  z: String,\n  o: String,\n  a: String,"
    );
}

#[test]
fn test_schema_shape_and_order() {
    let value = json!({"zebra": 1, "apple": "x"});
    let schema: serde_json::Value =
        serde_json::from_str(&generate_schema(&value).unwrap()).unwrap();

    assert_eq!(schema["type"], json!("object"));
    assert_eq!(schema["properties"]["zebra"]["type"], json!("number"));
    assert_eq!(schema["properties"]["apple"]["type"], json!("string"));

    let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["zebra", "apple"]);
}

#[test]
fn test_session_boundary_returns_error_strings() {
    let mut session = Session::new();
    session.input_data = "[1, 2, 3]".to_string();

    let code = session.generate_code().to_string();
    assert!(code.starts_with("Error:"));
    assert!(code.contains("object at the top level"));

    let schema = session.generate_schema().to_string();
    assert!(schema.starts_with("Error:"));
}

#[test]
fn test_session_generates_from_declared_format() {
    let mut session = Session::new();
    session.input_format = jsonviz::Format::Yaml;
    session.input_data = "a: 1\nb: x\n".to_string();
    session.code_target = CodeTarget::Typescript;

    assert_eq!(session.generate_code(), "  a: number;\n  b: string;");
}
