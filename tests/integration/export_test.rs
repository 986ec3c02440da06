//! Integration tests for graph image export
//!
//! Export renders the current on-screen graph, including view transform and
//! collapse state, into a named artifact; failures are non-fatal.

use jsonviz::graph::ExportFormat;
use jsonviz::session::Session;

fn session_with_graph() -> Session {
    let mut session = Session::new();
    session.input_data = r#"{"user": {"name": "Ada"}, "active": true}"#.to_string();
    session.visualize();
    session
}

#[test]
fn test_svg_export_contains_labels() {
    let mut session = session_with_graph();
    session.export_format = ExportFormat::Svg;

    let image = session.export_image().unwrap();
    assert_eq!(image.file_name, "graph.svg");
    assert_eq!(image.media_type, "image/svg+xml");

    let scene = String::from_utf8(image.bytes).unwrap();
    assert!(scene.contains("name: Ada"));
    assert!(scene.contains("active: true"));
}

#[test]
fn test_svg_export_reflects_collapse_state() {
    let mut session = session_with_graph();
    session.export_format = ExportFormat::Svg;
    let user_id = session.hierarchy().unwrap().all_children()[0].id();
    session.toggle_node(user_id);

    let scene = String::from_utf8(session.export_image().unwrap().bytes).unwrap();
    assert!(scene.contains("user"));
    assert!(!scene.contains("name: Ada"));
}

#[test]
fn test_svg_export_reflects_view_transform() {
    let mut session = session_with_graph();
    session.export_format = ExportFormat::Svg;
    session.pan(25.0, 10.0);

    let scene = String::from_utf8(session.export_image().unwrap().bytes).unwrap();
    assert!(scene.contains("translate(25,10)"));
}

#[test]
fn test_png_export_signature_and_name() {
    let mut session = session_with_graph();
    session.export_format = ExportFormat::Png;

    let image = session.export_image().unwrap();
    assert_eq!(image.file_name, "graph.png");
    assert_eq!(image.media_type, "image/png");
    assert_eq!(&image.bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_jpeg_export_signature_and_name() {
    let mut session = session_with_graph();
    session.export_format = ExportFormat::Jpeg;

    let image = session.export_image().unwrap();
    assert_eq!(image.file_name, "graph.jpeg");
    assert_eq!(image.media_type, "image/jpeg");
    assert_eq!(&image.bytes[..2], [0xFF, 0xD8]);
}

#[test]
fn test_export_failure_leaves_session_usable() {
    let mut session = Session::new();
    assert!(session.export_image().is_err());

    // The failed export mutated nothing; a normal pipeline still works.
    session.input_data = r#"{"a": 1}"#.to_string();
    session.visualize();
    assert!(session.export_image().is_ok());
}
