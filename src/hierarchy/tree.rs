use crate::foundation::core::NodeId;

/// A validated node with its aggregated weight and structural metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Arena id (breadth-first order).
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Aggregated weight: own value for leaves, sum of children otherwise.
    pub value: f64,
    /// Children sorted by descending aggregated weight (stable).
    pub children: Vec<NodeId>,
    /// Parent, `None` for the root.
    pub parent: Option<NodeId>,
    /// Distance from the root.
    pub depth: u32,
    /// Distance to the deepest descendant leaf.
    pub height: u32,
}

impl Node {
    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Immutable arena of nodes produced by [`crate::build_hierarchy`].
///
/// The arena owns every node; children are referenced by id and parents by optional id, so there
/// is no ownership cycle. Node order is breadth-first from the root, which is also the order the
/// scene binds nodes to visual elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
    pub(crate) nodes: Vec<Node>,
}

impl Hierarchy {
    /// Root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes (always at least one).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a hierarchy has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` belongs to this arena.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Node by id, if present.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics when `id` was not minted by this hierarchy.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Children of `id` in layout order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Height of the whole tree.
    pub fn height(&self) -> u32 {
        self.root().height
    }

    /// All nodes, root first, breadth-first.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Leaf nodes in breadth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// `id`, its parent, and so on up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|n| n.id),
        }
    }

    /// Nearest ancestor at depth 1 (the top-level branch containing `id`). `None` for the root.
    pub fn top_branch(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.node(a).depth == 1)
    }

    /// Root-to-node names joined by `/`, e.g. `"flare/analytics/cluster"`.
    pub fn path_names(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .map(|a| self.node(a).name.as_str())
            .collect();
        names.reverse();
        names.join("/")
    }

    /// Resolve a `/`-separated name path starting at the root name.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if segments.next()? != self.root().name {
            return None;
        }
        let mut cur = self.root_id();
        for seg in segments {
            cur = *self
                .children(cur)
                .iter()
                .find(|&&c| self.node(c).name == seg)?;
        }
        Some(cur)
    }
}

/// Iterator over a node and its ancestors, see [`Hierarchy::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a Hierarchy,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.tree.node(cur).parent;
        Some(cur)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hierarchy/tree.rs"]
mod tests;
