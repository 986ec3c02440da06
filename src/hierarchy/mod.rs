//! Hierarchy builder
//!
//! Pure, total mapping from a document value to a renderable tree. A node's
//! children are always fully populated; collapsing a node only hides them
//! from `visible_children`, so expanding is lossless.

use serde_json::Value;

/// Label of every tree root, regardless of input shape
pub const ROOT_LABEL: &str = "root";
/// Leaf label used when the top level is not an object or array
pub const NO_DATA_LABEL: &str = "no data";

/// One node of the visualization tree
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    id: usize,
    label: String,
    children: Vec<HierarchyNode>,
    collapsed: bool,
}

impl HierarchyNode {
    /// Build the tree for a document value.
    ///
    /// An object or array at the top level becomes a container root labeled
    /// "root" with one child per entry, recursively. Any other top-level
    /// shape yields a root with the single leaf "no data". Every node starts
    /// expanded; ids are unique within the built tree with the root at 0.
    pub fn build(value: &Value) -> HierarchyNode {
        let mut next_id = 0;
        let root_id = take_id(&mut next_id);

        let children = match value {
            Value::Object(map) => map
                .iter()
                .map(|(key, child)| build_entry(key, child, &mut next_id))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, child)| build_entry(&index.to_string(), child, &mut next_id))
                .collect(),
            _ => vec![HierarchyNode::leaf(take_id(&mut next_id), NO_DATA_LABEL)],
        };

        HierarchyNode {
            id: root_id,
            label: ROOT_LABEL.to_string(),
            children,
            collapsed: false,
        }
    }

    fn leaf(id: usize, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: Vec::new(),
            collapsed: false,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// All children, independent of collapse state. Never pruned.
    pub fn all_children(&self) -> &[HierarchyNode] {
        &self.children
    }

    /// The children that currently participate in layout: the full child
    /// list when expanded, nothing when collapsed.
    pub fn visible_children(&self) -> &[HierarchyNode] {
        if self.collapsed {
            &[]
        } else {
            &self.children
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Toggle the collapse state of the node with the given id anywhere in
    /// this subtree. Returns false when no such node exists.
    pub fn toggle(&mut self, id: usize) -> bool {
        if self.id == id {
            self.collapsed = !self.collapsed;
            return true;
        }
        self.children.iter_mut().any(|child| child.toggle(id))
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: usize) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Labels of every leaf in the subtree, depth-first, ignoring collapse
    /// state.
    pub fn leaf_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.collect_leaf_labels(&mut labels);
        labels
    }

    fn collect_leaf_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_leaf() {
            out.push(&self.label);
            return;
        }
        for child in &self.children {
            child.collect_leaf_labels(out);
        }
    }
}

fn take_id(next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;
    id
}

fn build_entry(key: &str, value: &Value, next_id: &mut usize) -> HierarchyNode {
    let id = take_id(next_id);
    match value {
        Value::Object(map) => HierarchyNode {
            id,
            label: key.to_string(),
            children: map
                .iter()
                .map(|(child_key, child)| build_entry(child_key, child, next_id))
                .collect(),
            collapsed: false,
        },
        Value::Array(items) => HierarchyNode {
            id,
            label: key.to_string(),
            children: items
                .iter()
                .enumerate()
                .map(|(index, child)| build_entry(&index.to_string(), child, next_id))
                .collect(),
            collapsed: false,
        },
        scalar => HierarchyNode::leaf(id, format!("{}: {}", key, display_value(scalar))),
    }
}

/// The literal printed form of a scalar used in leaf labels
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Containers never reach leaf position
        other => other.to_string(),
    }
}
