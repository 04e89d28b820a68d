use std::f64::consts::TAU;

use crate::{
    foundation::core::{ArcBounds, NodeId},
    hierarchy::tree::Hierarchy,
};

/// Base partition geometry for every node, indexed by [`NodeId`].
///
/// The root spans the full circle in band `[0, 1]`. Each node's children split its angular span
/// in proportion to their aggregated weight, in layout order, and a node at depth `d` occupies
/// band `[d, d + 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    bounds: Vec<ArcBounds>,
}

impl Layout {
    /// Compute the partition of `tree` over `2π` radians and `height + 1` bands.
    #[tracing::instrument(skip(tree), fields(nodes = tree.len()))]
    pub fn partition(tree: &Hierarchy) -> Self {
        let mut bounds = vec![ArcBounds::default(); tree.len()];
        bounds[0] = ArcBounds::new(0.0, TAU, 0.0, 1.0);

        // Ids are breadth-first, so a parent is always placed before its children.
        for node in tree.descendants() {
            if node.is_leaf() {
                continue;
            }
            let parent = bounds[node.id.index()];
            let k = if node.value > 0.0 {
                parent.angular_span() / node.value
            } else {
                0.0
            };
            let y0 = f64::from(node.depth + 1);
            let mut x = parent.x0;
            for &c in &node.children {
                let x0 = x;
                x += tree.node(c).value * k;
                bounds[c.index()] = ArcBounds::new(x0, x, y0, y0 + 1.0);
            }
        }

        Self { bounds }
    }

    /// Base bounds of `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` does not belong to the laid-out hierarchy.
    pub fn bounds(&self, id: NodeId) -> ArcBounds {
        self.bounds[id.index()]
    }

    /// Number of laid-out nodes.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// `(id, bounds)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, ArcBounds)> + '_ {
        self.bounds
            .iter()
            .enumerate()
            .map(|(i, b)| (NodeId(i as u32), *b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/partition.rs"]
mod tests;
