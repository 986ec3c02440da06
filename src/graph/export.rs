//! Image export for the on-screen graph
//!
//! The current layout and view transform are rendered into an SVG scene;
//! raster targets rasterize that scene. Export failures are non-fatal and
//! leave all session state untouched.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use svg::node::element::{Circle, Group, Line, Text};
use svg::Document;

use super::layout::Layout;
use super::view::ViewState;
use crate::error::ExportError;

const NODE_RADIUS: f64 = 5.0;
const NODE_FILL: &str = "#007acc";
const EDGE_STROKE: &str = "#999";
const LABEL_OFFSET: f64 = 10.0;
const FONT_SIZE: i32 = 12;

/// Supported image targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(ExportError::Unsupported(other.to_string())),
        }
    }
}

/// A finished export artifact, ready to hand to the download adapter
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Build the SVG scene for a layout under the given view transform.
pub fn render_svg(layout: &Layout, view: &ViewState) -> Document {
    let mut group = Group::new().set(
        "transform",
        format!(
            "translate({},{}) scale({})",
            view.translate_x, view.translate_y, view.scale
        ),
    );

    for edge in &layout.edges {
        let (Some(from), Some(to)) = (layout.node(edge.from), layout.node(edge.to)) else {
            continue;
        };
        group = group.add(
            Line::new()
                .set("stroke", EDGE_STROKE)
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y),
        );
    }

    for node in &layout.nodes {
        group = group.add(
            Circle::new()
                .set("cx", node.x)
                .set("cy", node.y)
                .set("r", NODE_RADIUS)
                .set("fill", NODE_FILL),
        );

        // Containers label to the left of their dot, leaves to the right.
        let (offset, anchor) = if node.has_visible_children {
            (-LABEL_OFFSET, "end")
        } else {
            (LABEL_OFFSET, "start")
        };
        group = group.add(
            Text::new(node.label.clone())
                .set("x", node.x + offset)
                .set("y", node.y + 3.0)
                .set("text-anchor", anchor)
                .set("font-family", "sans-serif")
                .set("font-size", FONT_SIZE),
        );
    }

    Document::new()
        .set("width", layout.extent.width)
        .set("height", layout.extent.height)
        .set(
            "viewBox",
            format!("0 0 {} {}", layout.extent.width, layout.extent.height),
        )
        .add(group)
}

/// Export the current graph as an image named `graph.<ext>`.
pub fn export_image(
    layout: &Layout,
    view: &ViewState,
    format: ExportFormat,
) -> Result<ExportedImage, ExportError> {
    let scene = render_svg(layout, view).to_string();

    let bytes = match format {
        ExportFormat::Svg => scene.into_bytes(),
        ExportFormat::Png => rasterize(&scene)?.0,
        ExportFormat::Jpeg => {
            let (_, pixmap) = rasterize(&scene)?;
            encode_jpeg(&pixmap)?
        }
    };

    log::debug!("exported graph.{} ({} bytes)", format.extension(), bytes.len());
    Ok(ExportedImage {
        file_name: format!("graph.{}", format.extension()),
        media_type: format.media_type(),
        bytes,
    })
}

/// Rasterize the SVG scene on a white background, returning PNG bytes and
/// the raw pixmap.
fn rasterize(scene: &str) -> Result<(Vec<u8>, resvg::tiny_skia::Pixmap), ExportError> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(scene, &options)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width().max(1), size.height().max(1))
        .ok_or_else(|| ExportError::Render("could not allocate pixel buffer".to_string()))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Render(e.to_string()))?;
    Ok((png, pixmap))
}

fn encode_jpeg(pixmap: &resvg::tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for pixel in pixmap.pixels() {
        let pixel = pixel.demultiply();
        rgb.extend_from_slice(&[pixel.red(), pixel.green(), pixel.blue()]);
    }

    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 90);
    encoder
        .encode(
            &rgb,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::Render(e.to_string()))?;
    Ok(bytes)
}
