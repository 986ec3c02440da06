//! Graph rendering: layout, pan/zoom transform, and image export
//!
//! Everything here is a pure function over the hierarchy tree and the view
//! state; event wiring is left to whichever adapter drives the session.

pub mod export;
pub mod layout;
pub mod view;

pub use export::{export_image, render_svg, ExportFormat, ExportedImage};
pub use layout::{layout, Edge, Extent, Layout, PlacedNode};
pub use view::ViewState;
