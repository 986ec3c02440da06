//! Deterministic node-link tree layout
//!
//! Depth maps to the x axis with the root at x = 0 and the deepest visible
//! level at the right edge. On the y axis every node owns a band of the
//! available extent; its visible children split that band evenly, which
//! guarantees that sibling subtrees never overlap. Only nodes visible under
//! their ancestors' collapse state are placed, and edges connect a visible
//! parent to its currently visible children only. The whole layout is
//! recomputed from scratch on every state-changing transition.

use crate::hierarchy::HierarchyNode;

/// Drawing area the layout distributes nodes across
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
        }
    }
}

/// A node with its computed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Whether the node currently shows children (affects label anchoring)
    pub has_visible_children: bool,
}

/// A parent-to-child link between two visible nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// The result of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<Edge>,
    pub extent: Extent,
}

impl Layout {
    pub fn node(&self, id: usize) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Compute positions for every visible node of the tree.
pub fn layout(root: &HierarchyNode, extent: Extent) -> Layout {
    let depth = visible_depth(root);
    // With the root alone, the single column sits at the left edge.
    let step = if depth == 0 {
        0.0
    } else {
        extent.width / depth as f64
    };

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    place(root, 0, step, (0.0, extent.height), &mut nodes, &mut edges);

    Layout {
        nodes,
        edges,
        extent,
    }
}

/// Depth of the deepest visible node, root being depth 0.
fn visible_depth(node: &HierarchyNode) -> usize {
    node.visible_children()
        .iter()
        .map(|child| 1 + visible_depth(child))
        .max()
        .unwrap_or(0)
}

fn place(
    node: &HierarchyNode,
    depth: usize,
    step: f64,
    band: (f64, f64),
    nodes: &mut Vec<PlacedNode>,
    edges: &mut Vec<Edge>,
) {
    let children = node.visible_children();
    nodes.push(PlacedNode {
        id: node.id(),
        label: node.label().to_string(),
        x: depth as f64 * step,
        y: (band.0 + band.1) / 2.0,
        has_visible_children: !children.is_empty(),
    });

    if children.is_empty() {
        return;
    }

    let slice = (band.1 - band.0) / children.len() as f64;
    for (index, child) in children.iter().enumerate() {
        let child_band = (
            band.0 + index as f64 * slice,
            band.0 + (index + 1) as f64 * slice,
        );
        edges.push(Edge {
            from: node.id(),
            to: child.id(),
        });
        place(child, depth + 1, step, child_band, nodes, edges);
    }
}
