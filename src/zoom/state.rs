use crate::{
    eval::visibility::VisibilityPolicy,
    foundation::core::{ArcBounds, NodeId},
    hierarchy::tree::Hierarchy,
    layout::partition::Layout,
};

/// Mutable per-node view state: what is on screen now and where it is heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView {
    /// Geometry presently rendered.
    pub current: ArcBounds,
    /// Geometry for the active zoom window.
    pub target: ArcBounds,
    /// Wedge fill opacity presently rendered.
    pub arc_opacity: f64,
    /// Label opacity presently rendered.
    pub label_opacity: f64,
    /// Whether the wedge receives pointer activations.
    pub interactive: bool,
}

/// Side table of [`NodeView`]s indexed by [`NodeId`], kept apart from the immutable tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    nodes: Vec<NodeView>,
}

impl ViewState {
    /// Initial state: every node rendered at its base layout, no animation pending.
    pub fn new(tree: &Hierarchy, layout: &Layout, policy: &VisibilityPolicy) -> Self {
        let nodes = tree
            .descendants()
            .map(|node| {
                let base = layout.bounds(node.id);
                NodeView {
                    current: base,
                    target: base,
                    arc_opacity: policy.arc_opacity(&base, !node.is_leaf()),
                    label_opacity: policy.label_opacity(&base),
                    interactive: policy.arc_visible(&base),
                }
            })
            .collect();
        Self { nodes }
    }

    /// View of `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` is outside the table.
    pub fn get(&self, id: NodeId) -> &NodeView {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut NodeView {
        &mut self.nodes[id.index()]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(id, view)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeView)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, v)| (NodeId(i as u32), v))
    }
}
