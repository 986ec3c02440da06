//! Config codec backed by the toml crate
//!
//! Values are transcoded through serde, so parsing yields the unified
//! document value directly. TOML cannot represent every document value:
//! serializing requires an object root, and nulls or tables appearing after
//! plain values surface as serialize errors.

use serde_json::Value;

use super::{type_name, Codec, Format};
use crate::error::{FormatParseError, FormatSerializeError};

/// TOML codec
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn parse(&self, raw: &str) -> Result<Value, FormatParseError> {
        let table: toml::Value = raw
            .parse()
            .map_err(|e: toml::de::Error| FormatParseError::new(Format::Toml, e.to_string()))?;
        serde_json::to_value(table)
            .map_err(|e| FormatParseError::new(Format::Toml, e.to_string()))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError> {
        if !value.is_object() {
            return Err(FormatSerializeError::non_object_root(
                Format::Toml,
                type_name(value),
            ));
        }
        toml::to_string_pretty(value)
            .map_err(|e| FormatSerializeError::new(Format::Toml, e.to_string()))
    }
}
