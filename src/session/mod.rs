//! Visualization session
//!
//! An explicit context value threaded through every operation: the codec
//! registry, the current input text and formats, the document value, the
//! hierarchy tree, and the view transform. Nothing global, nothing shared;
//! one session owns one tree and one ViewState.
//!
//! Every user-triggered operation runs synchronously to completion. The
//! codec and generator boundaries never propagate errors: the caller always
//! receives either the produced text or an "Error:"-prefixed description.
//! Image export is the one exception, surfacing its failure as a value.

use serde_json::{json, Value};

use crate::codec::{CodecRegistry, Format};
use crate::codegen::{self, CodeTarget};
use crate::error::{DropRejected, ExportError, ValidationResult, VisualizerError};
use crate::graph::{export_image, layout, ExportFormat, ExportedImage, Extent, Layout, ViewState};
use crate::hierarchy::HierarchyNode;
use crate::jwt;
use crate::validation;

/// Leaf shown when the input cannot be parsed during visualization
const PARSE_FAILURE_MESSAGE: &str = "Unable to parse graph";

/// Feature toggles mirroring the tool's checkboxes
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Clicking a node collapses or expands it
    pub collapse_enabled: bool,
    /// Hovering a node shows its full label
    pub tooltips_enabled: bool,
    /// Re-run the full pipeline on every input change
    pub auto_refresh: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            collapse_enabled: true,
            tooltips_enabled: true,
            auto_refresh: false,
        }
    }
}

/// Floating label shown next to the pointer while hovering a node
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// One interactive visualization session
pub struct Session {
    registry: CodecRegistry,
    pub input_data: String,
    pub input_format: Format,
    pub output_format: Format,
    pub code_target: CodeTarget,
    pub export_format: ExportFormat,
    pub options: SessionOptions,
    pub extent: Extent,
    document: Option<Value>,
    hierarchy: Option<HierarchyNode>,
    view: ViewState,
    tooltip: Option<Tooltip>,
    pub generated_code: String,
    pub schema: String,
    pub validation_result: Option<ValidationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            registry: CodecRegistry::new(),
            input_data: String::new(),
            input_format: Format::Json,
            output_format: Format::Json,
            code_target: CodeTarget::Typescript,
            export_format: ExportFormat::Svg,
            options: SessionOptions::default(),
            extent: Extent::default(),
            document: None,
            hierarchy: None,
            view: ViewState::default(),
            tooltip: None,
            generated_code: String::new(),
            schema: String::new(),
            validation_result: None,
        }
    }

    /// Replace the input text. With auto-refresh enabled this re-runs the
    /// full pipeline; re-rendering generates no further input events, so no
    /// debouncing is needed.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_data = text.into();
        if self.options.auto_refresh {
            self.visualize();
        }
    }

    /// Convert the input text into the selected output format, writing the
    /// result (or the error description) back into the input area.
    pub fn convert_data(&mut self) -> &str {
        self.input_data =
            self.registry
                .convert_text(&self.input_data, self.input_format, self.output_format);
        &self.input_data
    }

    /// Decode the input as a JWT, writing the pretty-printed JSON array of
    /// its segments (or the error description) back into the input area.
    pub fn decode_jwt(&mut self) -> &str {
        self.input_data = match jwt::decode(self.input_data.trim()) {
            Ok(decoded) => decoded,
            Err(e) => VisualizerError::from(e).user_message(),
        };
        &self.input_data
    }

    /// Validate the input against its declared format, beautifying on
    /// success.
    pub fn validate_data(&mut self) -> ValidationResult {
        let result =
            validation::validate_and_beautify(&self.registry, &self.input_data, self.input_format);
        self.validation_result = Some(result.clone());
        result
    }

    /// Validate the current input against a schema (generated or supplied).
    pub fn validate_against_schema(&mut self, schema_text: &str) -> ValidationResult {
        let result = match self.parse_pair(schema_text) {
            Ok((data, schema)) => match validation::validate_against_schema(&data, &schema) {
                Ok(()) => ValidationResult::ok("Data is valid against schema"),
                Err(e) => ValidationResult::failed(format!("Validation failed: {}", e.message)),
            },
            Err(e) => ValidationResult::failed(e.user_message()),
        };
        self.validation_result = Some(result.clone());
        result
    }

    fn parse_pair(&self, schema_text: &str) -> Result<(Value, Value), VisualizerError> {
        let data = self.registry.parse(&self.input_data, self.input_format)?;
        let schema = self.registry.parse(schema_text, Format::Json)?;
        Ok((data, schema))
    }

    /// Generate code for the selected target from the current input.
    pub fn generate_code(&mut self) -> &str {
        self.generated_code = self.generate_artifact(self.code_target);
        &self.generated_code
    }

    /// Generate a JSON Schema from the current input.
    pub fn generate_schema(&mut self) -> &str {
        self.schema = self.generate_artifact(CodeTarget::JsonSchema);
        &self.schema
    }

    fn generate_artifact(&self, target: CodeTarget) -> String {
        let result = self
            .registry
            .parse(&self.input_data, self.input_format)
            .map_err(VisualizerError::from)
            .and_then(|value| {
                codegen::generate_code(&value, target).map_err(VisualizerError::from)
            });
        result.unwrap_or_else(|e| e.user_message())
    }

    /// Parse the input and rebuild the hierarchy tree. The previous tree is
    /// discarded wholesale; the view transform persists until explicitly
    /// reset. A parse failure renders as a single error leaf.
    pub fn visualize(&mut self) -> &HierarchyNode {
        let value = match self.registry.parse(&self.input_data, self.input_format) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("visualize fell back to error leaf: {e}");
                json!({ "error": PARSE_FAILURE_MESSAGE })
            }
        };
        let tree = HierarchyNode::build(&value);
        self.document = Some(value);
        self.tooltip = None;
        self.hierarchy.insert(tree)
    }

    /// The document value of the last visualize call.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// The hierarchy tree of the last visualize call.
    pub fn hierarchy(&self) -> Option<&HierarchyNode> {
        self.hierarchy.as_ref()
    }

    /// Collapse or expand the clicked node. A no-op when the collapse
    /// feature is disabled or no tree is built. Returns whether a node
    /// toggled, in which case the caller re-runs layout.
    pub fn toggle_node(&mut self, id: usize) -> bool {
        if !self.options.collapse_enabled {
            return false;
        }
        match self.hierarchy.as_mut() {
            Some(tree) => tree.toggle(id),
            None => false,
        }
    }

    /// Compute positions for the currently visible nodes.
    pub fn layout(&self) -> Option<Layout> {
        self.hierarchy.as_ref().map(|tree| layout(tree, self.extent))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Pointer drag: moves the whole tree, positions stay untouched.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    /// Wheel zoom anchored at the pointer position.
    pub fn zoom_at(&mut self, factor: f64, px: f64, py: f64) {
        self.view.zoom_at(factor, px, py);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Show the hovered node's full label at the pointer location.
    pub fn hover(&mut self, id: usize, x: f64, y: f64) -> Option<&Tooltip> {
        if !self.options.tooltips_enabled {
            return None;
        }
        let label = self.hierarchy.as_ref()?.find(id)?.label().to_string();
        self.tooltip = Some(Tooltip { label, x, y });
        self.tooltip.as_ref()
    }

    /// Pointer left the node: the tooltip disappears.
    pub fn clear_hover(&mut self) {
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Export the current graph, including the view transform and collapse
    /// state, as `graph.<ext>`. Fails without touching any session state.
    pub fn export_image(&self) -> Result<ExportedImage, ExportError> {
        let layout = self
            .layout()
            .ok_or_else(|| ExportError::Render("nothing to export: no graph built".to_string()))?;
        export_image(&layout, &self.view, self.export_format)
    }

    /// Accept a dropped file. Only the structured-object content type is
    /// accepted; anything else is rejected and the session is untouched.
    pub fn drop_file(&mut self, content_type: &str, content: &str) -> Result<(), DropRejected> {
        if content_type != "application/json" {
            return Err(DropRejected {
                content_type: content_type.to_string(),
            });
        }
        self.input_format = Format::Json;
        self.set_input(content.to_string());
        Ok(())
    }

    /// Clear the input and every derived artifact. The view transform is
    /// deliberately left alone.
    pub fn clear(&mut self) {
        self.input_data.clear();
        self.generated_code.clear();
        self.schema.clear();
        self.validation_result = None;
        self.document = None;
        self.hierarchy = None;
        self.tooltip = None;
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
