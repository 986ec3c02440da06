//! Integration tests for format conversion
//!
//! Covers the parse/serialize pairs of all five codecs, the round-trip
//! property for object-shaped documents, the CSV no-coercion policy, and
//! the object-root requirement of the XML and TOML serializers.

use assert_matches::assert_matches;
use jsonviz::codec::{CodecRegistry, Format};
use jsonviz::error::VisualizerError;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_json_round_trip_is_deep_equal() {
    let registry = CodecRegistry::new();
    let document = json!({
        "name": "Ada",
        "age": 30,
        "active": true,
        "tags": ["math", "engines"],
        "address": {"city": "London", "zip": null}
    });

    let serialized = registry.serialize(&document, Format::Json).unwrap();
    let converted = registry
        .convert(&serialized, Format::Json, Format::Json)
        .unwrap();
    let reparsed = registry.parse(&converted, Format::Json).unwrap();
    assert_eq!(reparsed, document);
}

#[test]
fn test_csv_to_json_keeps_values_as_strings() {
    let registry = CodecRegistry::new();
    let converted = registry
        .convert("name,age\nAda,30", Format::Csv, Format::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&converted).unwrap();
    assert_eq!(value, json!([{"name": "Ada", "age": "30"}]));
}

#[test]
fn test_bare_array_into_xml_fails_serialize() {
    let registry = CodecRegistry::new();
    let err = registry
        .convert("[1,2,3]", Format::Json, Format::Xml)
        .unwrap_err();
    assert_matches!(err, VisualizerError::Serialize(_));
}

#[test]
fn test_bare_array_into_toml_fails_serialize() {
    let registry = CodecRegistry::new();
    let err = registry
        .convert("[1,2,3]", Format::Json, Format::Toml)
        .unwrap_err();
    assert_matches!(err, VisualizerError::Serialize(_));
}

#[test]
fn test_scalar_root_into_config_formats_fails() {
    let registry = CodecRegistry::new();
    for target in [Format::Xml, Format::Toml] {
        let err = registry.convert("42", Format::Json, target).unwrap_err();
        assert_matches!(err, VisualizerError::Serialize(_), "{target}");
    }
}

#[test]
fn test_json_to_yaml_to_json() {
    let registry = CodecRegistry::new();
    let original = r#"{"server": {"host": "localhost", "port": 8080}}"#;

    let yaml = registry.convert(original, Format::Json, Format::Yaml).unwrap();
    assert!(yaml.contains("host: localhost"));

    let back = registry.convert(&yaml, Format::Yaml, Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&back).unwrap();
    assert_eq!(value["server"]["port"], json!(8080));
}

#[test]
fn test_json_to_toml_object() {
    let registry = CodecRegistry::new();
    let toml_text = registry
        .convert(
            r#"{"title": "demo", "owner": {"name": "Ada"}}"#,
            Format::Json,
            Format::Toml,
        )
        .unwrap();
    assert!(toml_text.contains("title = \"demo\""));
    assert!(toml_text.contains("[owner]"));
}

#[test]
fn test_xml_compact_convention_separates_attributes() {
    let registry = CodecRegistry::new();
    let converted = registry
        .convert(
            r#"<user id="7"><name>Ada</name></user>"#,
            Format::Xml,
            Format::Json,
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&converted).unwrap();
    assert_eq!(value["user"]["_attributes"]["id"], json!("7"));
    assert_eq!(value["user"]["name"]["_text"], json!("Ada"));
}

#[test]
fn test_convert_text_never_propagates_errors() {
    let registry = CodecRegistry::new();

    let parse_failure = registry.convert_text("{broken", Format::Json, Format::Yaml);
    assert!(parse_failure.starts_with("Error:"));
    assert!(parse_failure.contains("parse error"));

    let serialize_failure = registry.convert_text("[1,2]", Format::Json, Format::Toml);
    assert!(serialize_failure.starts_with("Error:"));
    assert!(serialize_failure.contains("serialize error"));

    let success = registry.convert_text(r#"{"a": 1}"#, Format::Json, Format::Yaml);
    assert!(!success.starts_with("Error:"));
}

#[test]
fn test_mixed_typing_across_formats_is_accepted() {
    // The same logical data parsed from different formats may differ in node
    // typing; no canonicalization is applied.
    let registry = CodecRegistry::new();
    let from_json = registry.parse(r#"[{"age": 30}]"#, Format::Json).unwrap();
    let from_csv = registry.parse("age\n30", Format::Csv).unwrap();
    assert_eq!(from_json[0]["age"], json!(30));
    assert_eq!(from_csv[0]["age"], json!("30"));
}
