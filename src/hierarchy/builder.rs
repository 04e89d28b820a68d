use std::collections::{HashMap, VecDeque};

use crate::{
    foundation::core::NodeId,
    foundation::error::{SunburstError, SunburstResult},
    hierarchy::raw::{FlatNode, RawNode},
    hierarchy::tree::{Hierarchy, Node},
};

/// Validate a nested input tree and build the aggregated, sorted arena.
///
/// Leaves contribute their `value` (absent reads as `0`); every internal node's weight is the sum
/// of its children, and children are ordered by descending weight with ties kept in input order.
///
/// Fails with [`SunburstError::InvalidTree`] when a node has no `name` or a leaf value is negative
/// or not finite.
#[tracing::instrument(skip(raw))]
pub fn build_hierarchy(raw: &RawNode) -> SunburstResult<Hierarchy> {
    let mut staged = Vec::<Staged>::new();
    let mut stack: Vec<(&RawNode, Option<usize>, usize)> = vec![(raw, None, 0)];

    while let Some((node, parent, position)) = stack.pop() {
        let Some(name) = node.name.clone() else {
            let location = match parent {
                Some(p) => format!("child #{position} of '{}'", staged_path(&staged, p)),
                None => "the root".to_owned(),
            };
            return Err(SunburstError::invalid_tree(format!(
                "{location} is missing `name`"
            )));
        };

        let idx = staged.len();
        staged.push(Staged {
            name,
            value: node.value,
            children: Vec::new(),
            parent,
        });
        if let Some(p) = parent {
            staged[p].children.push(idx);
        }
        for (pos, child) in node.child_nodes().iter().enumerate().rev() {
            stack.push((child, Some(idx), pos));
        }
    }

    assemble(staged, 0)
}

/// Build the arena from a parent-pointer table.
///
/// Besides the checks of [`build_hierarchy`], this rejects empty tables, duplicate ids, unknown
/// parents, more than one root, and cycles (rows that cannot be reached from the root).
#[tracing::instrument(skip(rows), fields(rows = rows.len()))]
pub fn build_hierarchy_from_flat(rows: &[FlatNode]) -> SunburstResult<Hierarchy> {
    if rows.is_empty() {
        return Err(SunburstError::invalid_tree("flat table has no rows"));
    }

    let mut index = HashMap::<&str, usize>::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if index.insert(row.id.as_str(), i).is_some() {
            return Err(SunburstError::invalid_tree(format!(
                "duplicate id '{}'",
                row.id
            )));
        }
    }

    let mut staged = Vec::<Staged>::with_capacity(rows.len());
    for row in rows {
        let name = row.name.clone().ok_or_else(|| {
            SunburstError::invalid_tree(format!("row '{}' is missing `name`", row.id))
        })?;
        staged.push(Staged {
            name,
            value: row.value,
            children: Vec::new(),
            parent: None,
        });
    }

    let mut root = None;
    for (i, row) in rows.iter().enumerate() {
        match row.parent.as_deref() {
            None => {
                if let Some(prev) = root.replace(i) {
                    return Err(SunburstError::invalid_tree(format!(
                        "multiple roots: '{}' and '{}'",
                        rows[prev].id, row.id
                    )));
                }
            }
            Some(p) => {
                let &pi = index.get(p).ok_or_else(|| {
                    SunburstError::invalid_tree(format!(
                        "row '{}' references unknown parent '{p}'",
                        row.id
                    ))
                })?;
                if pi == i {
                    return Err(SunburstError::invalid_tree(format!(
                        "cycle detected: row '{}' is its own parent",
                        row.id
                    )));
                }
                staged[i].parent = Some(pi);
                staged[pi].children.push(i);
            }
        }
    }

    let root = root.ok_or_else(|| {
        SunburstError::invalid_tree("cycle detected: every row has a parent, so there is no root")
    })?;

    let order = bfs_order(&staged, root);
    if order.len() != staged.len() {
        let mut reached = vec![false; staged.len()];
        for &i in &order {
            reached[i] = true;
        }
        let stray = reached.iter().position(|&r| !r).unwrap_or(0);
        return Err(SunburstError::invalid_tree(format!(
            "cycle detected: row '{}' is not reachable from root '{}'",
            rows[stray].id, rows[root].id
        )));
    }

    assemble(staged, root)
}

struct Staged {
    name: String,
    value: Option<f64>,
    children: Vec<usize>,
    parent: Option<usize>,
}

fn staged_path(staged: &[Staged], mut idx: usize) -> String {
    let mut names = vec![staged[idx].name.as_str()];
    while let Some(p) = staged[idx].parent {
        names.push(staged[p].name.as_str());
        idx = p;
    }
    names.reverse();
    names.join("/")
}

fn bfs_order(staged: &[Staged], root: usize) -> Vec<usize> {
    let mut seen = vec![false; staged.len()];
    let mut order = Vec::with_capacity(staged.len());
    let mut queue = VecDeque::from([root]);
    seen[root] = true;
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &c in &staged[i].children {
            if !seen[c] {
                seen[c] = true;
                queue.push_back(c);
            }
        }
    }
    order
}

fn assemble(mut staged: Vec<Staged>, root: usize) -> SunburstResult<Hierarchy> {
    let n = staged.len();
    if u32::try_from(n).is_err() {
        return Err(SunburstError::invalid_tree(format!(
            "tree has {n} nodes, more than an arena can index"
        )));
    }

    let mut value = vec![0.0f64; n];
    let mut height = vec![0u32; n];
    for &i in bfs_order(&staged, root).iter().rev() {
        let s = &staged[i];
        if s.children.is_empty() {
            let v = s.value.unwrap_or(0.0);
            if !v.is_finite() || v < 0.0 {
                return Err(SunburstError::invalid_tree(format!(
                    "leaf '{}' has invalid value {v}",
                    staged_path(&staged, i)
                )));
            }
            value[i] = v;
        } else {
            if s.value.is_some() {
                tracing::debug!(node = %s.name, "ignoring value on internal node");
            }
            value[i] = s.children.iter().map(|&c| value[c]).sum();
            height[i] = 1 + s.children.iter().map(|&c| height[c]).max().unwrap_or(0);
        }
    }

    for s in &mut staged {
        s.children.sort_by(|&a, &b| value[b].total_cmp(&value[a]));
    }

    let order = bfs_order(&staged, root);
    let mut new_id = vec![NodeId::ROOT; n];
    for (k, &i) in order.iter().enumerate() {
        new_id[i] = NodeId(k as u32);
    }

    let mut nodes = Vec::<Node>::with_capacity(n);
    for &i in &order {
        let s = &mut staged[i];
        nodes.push(Node {
            id: new_id[i],
            name: std::mem::take(&mut s.name),
            value: value[i],
            children: s.children.iter().map(|&c| new_id[c]).collect(),
            parent: None,
            depth: 0,
            height: height[i],
        });
    }

    for k in 0..nodes.len() {
        let depth = nodes[k].depth;
        for j in 0..nodes[k].children.len() {
            let c = nodes[k].children[j];
            let child = &mut nodes[c.index()];
            child.parent = Some(NodeId(k as u32));
            child.depth = depth + 1;
        }
    }

    Ok(Hierarchy { nodes })
}

#[cfg(test)]
#[path = "../../tests/unit/hierarchy/builder.rs"]
mod tests;
