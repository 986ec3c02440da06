//! Error types for parsing, conversion, generation, and export

use std::fmt;

use crate::codec::Format;

/// Input text was malformed for its declared format
#[derive(Debug, Clone, thiserror::Error)]
#[error("{format} parse error: {message}")]
pub struct FormatParseError {
    pub format: Format,
    pub message: String,
}

impl FormatParseError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

/// A value's root shape (or content) is incompatible with the target format
#[derive(Debug, Clone, thiserror::Error)]
#[error("{format} serialize error: {message}")]
pub struct FormatSerializeError {
    pub format: Format,
    pub message: String,
}

impl FormatSerializeError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }

    /// The XML and TOML codecs only accept an object at the top level.
    pub fn non_object_root(format: Format, found: &str) -> Self {
        Self::new(
            format,
            format!("{format} requires an object at the top level, found {found}"),
        )
    }
}

/// Structural mismatch between a document and a schema
#[derive(Debug, Clone, thiserror::Error)]
#[error("schema validation failed: {message}")]
pub struct SchemaValidationError {
    pub message: String,
}

impl SchemaValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Image export failures; never fatal, state is left unchanged
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    Unsupported(String),

    #[error("rendering failed: {0}")]
    Render(String),
}

/// A dropped file was not of the required content type
#[derive(Debug, Clone, thiserror::Error)]
#[error("dropped file rejected: expected application/json, got {content_type}")]
pub struct DropRejected {
    pub content_type: String,
}

/// A JWT segment could not be decoded into a document value
#[derive(Debug, Clone, thiserror::Error)]
#[error("jwt decode error: {message}")]
pub struct JwtDecodeError {
    pub message: String,
}

impl JwtDecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Code/schema generation was asked for a value it cannot describe
#[derive(Debug, Clone, thiserror::Error)]
#[error("code generation requires an object at the top level, found {found}")]
pub struct GenerateError {
    pub found: String,
}

impl GenerateError {
    pub fn new(found: impl Into<String>) -> Self {
        Self {
            found: found.into(),
        }
    }
}

/// Unified error type for all pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum VisualizerError {
    #[error(transparent)]
    Parse(#[from] FormatParseError),

    #[error(transparent)]
    Serialize(#[from] FormatSerializeError),

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Drop(#[from] DropRejected),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Jwt(#[from] JwtDecodeError),
}

impl VisualizerError {
    /// Human-readable form used at the "never throws" string boundary.
    ///
    /// Every operation that feeds a text area reports failures as a normal
    /// result string with this prefix instead of propagating the error.
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}

/// Result of validating or beautifying an input document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result type for pipeline operations
pub type VisualizerResult<T> = Result<T, VisualizerError>;
