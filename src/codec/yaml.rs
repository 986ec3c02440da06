//! Block-style codec backed by serde_yaml

use serde_json::Value;

use super::{Codec, Format};
use crate::error::{FormatParseError, FormatSerializeError};

/// YAML codec
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, raw: &str) -> Result<Value, FormatParseError> {
        serde_yaml::from_str(raw).map_err(|e| FormatParseError::new(Format::Yaml, e.to_string()))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatSerializeError> {
        serde_yaml::to_string(value)
            .map_err(|e| FormatSerializeError::new(Format::Yaml, e.to_string()))
    }
}
