//! jsonviz - structured-data visualizer and converter
//!
//! Parses text in one of five serialization formats (JSON, YAML, CSV, XML,
//! TOML) into a unified document value, converts between formats, generates
//! shallow code/schema stubs, and renders the value as a collapsible,
//! pannable/zoomable node-link tree exportable to PNG, JPEG, or SVG.

pub mod cli;
pub mod codec;
pub mod codegen;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod jwt;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use codec::{Codec, CodecRegistry, Format};
pub use codegen::{generate_code, generate_schema, CodeTarget};
pub use error::{
    DropRejected, ExportError, FormatParseError, FormatSerializeError, GenerateError,
    JwtDecodeError, SchemaValidationError, ValidationResult, VisualizerError, VisualizerResult,
};
pub use graph::{export_image, layout, ExportFormat, ExportedImage, Extent, Layout, ViewState};
pub use hierarchy::HierarchyNode;
pub use session::{Session, SessionOptions, Tooltip};

/// Convert raw text between two formats with a fresh registry.
pub fn convert(raw: &str, from: Format, to: Format) -> VisualizerResult<String> {
    CodecRegistry::new().convert(raw, from, to)
}

/// Convert at the string boundary: the result is either the converted text
/// or an "Error:"-prefixed description.
pub fn convert_text(raw: &str, from: Format, to: Format) -> String {
    CodecRegistry::new().convert_text(raw, from, to)
}
