//! Format codec registry
//!
//! One parse/serialize pair per supported text format. Every codec parses
//! into the unified document value (`serde_json::Value` with insertion-order
//! object keys) and serializes back out of it; conversion between any two
//! formats is parse composed with serialize.

pub mod csv;
pub mod json;
pub mod toml;
pub mod xml;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde_json::Value;

use crate::error::{FormatParseError, FormatSerializeError, VisualizerError, VisualizerResult};

/// The five supported text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
    Csv,
    Xml,
    Toml,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Json,
        Format::Yaml,
        Format::Csv,
        Format::Xml,
        Format::Toml,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Csv => "csv",
            Format::Xml => "xml",
            Format::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "csv" => Ok(Format::Csv),
            "xml" => Ok(Format::Xml),
            "toml" => Ok(Format::Toml),
            other => Err(format!("unsupported format: {other}")),
        }
    }
}

/// A parse/serialize capability pair for one text format
pub trait Codec {
    /// The format this codec implements.
    fn format(&self) -> Format;

    /// Parse raw text into a fresh document value. No canonicalization is
    /// applied; downstream stages consume the value as-is.
    fn parse(&self, raw: &str) -> Result<Value, FormatParseError>;

    /// Serialize a document value into this codec's text form.
    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError>;
}

/// Registry holding one codec per supported format
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Create a registry with all five built-in codecs.
    pub fn new() -> Self {
        Self {
            codecs: vec![
                Box::new(json::JsonCodec),
                Box::new(yaml::YamlCodec),
                Box::new(csv::CsvCodec),
                Box::new(xml::XmlCodec),
                Box::new(toml::TomlCodec),
            ],
        }
    }

    pub fn codec(&self, format: Format) -> &dyn Codec {
        self.codecs
            .iter()
            .find(|c| c.format() == format)
            .map(|c| c.as_ref())
            .expect("every format is registered at construction")
    }

    /// Parse raw text declared to be in `format`.
    pub fn parse(&self, raw: &str, format: Format) -> Result<Value, FormatParseError> {
        self.codec(format).parse(raw)
    }

    /// Serialize a document value into `format`.
    pub fn serialize(&self, value: &Value, format: Format) -> Result<String, FormatSerializeError> {
        self.codec(format).serialize(value)
    }

    /// Convert raw text from one format to another: parse then serialize.
    pub fn convert(&self, raw: &str, from: Format, to: Format) -> VisualizerResult<String> {
        let value = self.parse(raw, from)?;
        let output = self.serialize(&value, to)?;
        log::debug!("converted {} -> {} ({} bytes)", from, to, output.len());
        Ok(output)
    }

    /// Convert at the string boundary: the result is either the converted
    /// text or an "Error:"-prefixed description. This call never panics and
    /// never propagates an error to the caller.
    pub fn convert_text(&self, raw: &str, from: Format, to: Format) -> String {
        self.convert(raw, from, to)
            .unwrap_or_else(|e: VisualizerError| e.user_message())
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of a value's runtime tag, used in error messages and schemas.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
