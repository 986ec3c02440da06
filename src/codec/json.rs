//! Structured-object codec backed by serde_json

use serde_json::Value;

use super::{Codec, Format};
use crate::error::{FormatParseError, FormatSerializeError};

/// JSON codec; output is pretty-printed with 2-space indentation
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, raw: &str) -> Result<Value, FormatParseError> {
        serde_json::from_str(raw).map_err(|e| FormatParseError::new(Format::Json, e.to_string()))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| FormatSerializeError::new(Format::Json, e.to_string()))
    }
}
