//! Integration tests for the interactive session
//!
//! The session owns one hierarchy tree and one view transform; every
//! operation is synchronous and the view persists across rebuilds.

use jsonviz::codec::Format;
use jsonviz::graph::layout;
use jsonviz::hierarchy::HierarchyNode;
use jsonviz::session::Session;
use serde_json::json;

#[test]
fn test_hierarchy_totality_for_flat_object() {
    let value = json!({"a": 1, "b": "x", "c": true, "d": null});
    let tree = HierarchyNode::build(&value);
    assert_eq!(tree.leaf_labels(), ["a: 1", "b: x", "c: true", "d: null"]);
}

#[test]
fn test_hierarchy_totality_for_nested_object() {
    let value = json!({
        "user": {"name": "Ada", "age": 30},
        "tags": ["x", "y"]
    });
    let tree = HierarchyNode::build(&value);
    assert_eq!(
        tree.leaf_labels(),
        ["name: Ada", "age: 30", "0: x", "1: y"]
    );
}

#[test]
fn test_file_drop_example() {
    // Dropping data.json with {"x":true} while auto-refresh is enabled
    // replaces the input area and renders root -> "x: true".
    let mut session = Session::new();
    session.options.auto_refresh = true;

    session
        .drop_file("application/json", r#"{"x":true}"#)
        .unwrap();

    assert_eq!(session.input_data, r#"{"x":true}"#);
    assert_eq!(session.input_format, Format::Json);

    let tree = session.hierarchy().expect("tree was built on drop");
    assert_eq!(tree.label(), "root");
    let children: Vec<&str> = tree.all_children().iter().map(|c| c.label()).collect();
    assert_eq!(children, ["x: true"]);
}

#[test]
fn test_rejected_drop_leaves_everything_unchanged() {
    let mut session = Session::new();
    session.options.auto_refresh = true;
    session.input_data = "previous".to_string();

    let err = session.drop_file("image/png", "binary").unwrap_err();
    assert_eq!(err.content_type, "image/png");
    assert_eq!(session.input_data, "previous");
    assert!(session.hierarchy().is_none());
}

#[test]
fn test_auto_refresh_reruns_pipeline_on_edit() {
    let mut session = Session::new();
    session.options.auto_refresh = true;

    session.set_input(r#"{"a": 1}"#);
    assert_eq!(session.hierarchy().unwrap().all_children()[0].label(), "a: 1");

    session.set_input(r#"{"b": 2}"#);
    assert_eq!(session.hierarchy().unwrap().all_children()[0].label(), "b: 2");
}

#[test]
fn test_collapse_expand_round_trip_through_layout() {
    let mut session = Session::new();
    session.input_data = r#"{"group": {"a": 1, "b": 2}, "leaf": 3}"#.to_string();
    session.visualize();

    let group_id = session.hierarchy().unwrap().all_children()[0].id();
    let expanded = session.layout().unwrap();

    assert!(session.toggle_node(group_id));
    let collapsed = session.layout().unwrap();
    assert_eq!(collapsed.nodes.len(), expanded.nodes.len() - 2);

    assert!(session.toggle_node(group_id));
    let restored = session.layout().unwrap();
    assert_eq!(restored, expanded);
}

#[test]
fn test_pan_zoom_does_not_touch_layout_or_nodes() {
    let mut session = Session::new();
    session.input_data = r#"{"a": {"b": 1}}"#.to_string();
    session.visualize();

    let before = session.layout().unwrap();
    session.pan(100.0, -50.0);
    session.zoom_at(2.0, 10.0, 10.0);
    let after = session.layout().unwrap();

    assert_eq!(before, after);
    assert!(session.view().scale > 1.0);
}

#[test]
fn test_rebuild_discards_previous_tree_but_keeps_view() {
    let mut session = Session::new();
    session.input_data = r#"{"a": {"b": 1}}"#.to_string();
    session.visualize();

    let container = session.hierarchy().unwrap().all_children()[0].id();
    session.toggle_node(container);
    session.pan(12.0, 0.0);

    // A fresh visualize rebuilds everything expanded; the view survives.
    session.visualize();
    let tree = session.hierarchy().unwrap();
    assert!(!tree.find(container).unwrap().is_collapsed());
    assert_eq!(session.view().translate_x, 12.0);
}

#[test]
fn test_validate_data_beautifies() {
    let mut session = Session::new();
    session.input_data = r#"{"a":1}"#.to_string();
    let result = session.validate_data();
    assert!(result.valid);
    assert_eq!(result.message, "{\n  \"a\": 1\n}");
}

#[test]
fn test_validate_against_generated_schema() {
    let mut session = Session::new();
    session.input_data = r#"{"a": 1, "b": "x"}"#.to_string();
    let schema = session.generate_schema().to_string();

    let result = session.validate_against_schema(&schema);
    assert!(result.valid, "{}", result.message);

    session.input_data = r#"{"a": "now a string", "b": "x"}"#.to_string();
    let result = session.validate_against_schema(&schema);
    assert!(!result.valid);
    assert!(result.message.contains("expected number"));
}

#[test]
fn test_layout_is_recomputed_from_visible_state_only() {
    let value = json!({"a": {"x": 1, "y": 2}, "b": 3});
    let mut tree = HierarchyNode::build(&value);
    let container = tree.all_children()[0].id();
    tree.toggle(container);

    let placed = layout(&tree, jsonviz::Extent::default());
    assert!(placed.node(container).is_some());
    for child in tree.find(container).unwrap().all_children() {
        assert!(placed.node(child.id()).is_none());
    }
}
