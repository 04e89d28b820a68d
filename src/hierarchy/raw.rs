use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SunburstError, SunburstResult};

/// Input node as it arrives from the host, before validation and aggregation.
///
/// ```json
/// { "name": "root", "children": [ { "name": "A", "value": 10 }, { "name": "B", "value": 30 } ] }
/// ```
///
/// `name` is optional at the type level so a missing name surfaces as
/// [`SunburstError::InvalidTree`] from the builder rather than as a parse failure.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawNode {
    /// Display label, unique among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Leaf weight. Ignored on nodes that have children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Ordered children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    /// Leaf with a weight.
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value),
            children: None,
        }
    }

    /// Internal node with ordered children.
    pub fn branch(name: impl Into<String>, children: Vec<RawNode>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
            children: Some(children),
        }
    }

    /// Children as a slice; absent children read as empty.
    pub fn child_nodes(&self) -> &[RawNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Parse a nested tree from JSON text.
    pub fn from_json_str(s: &str) -> SunburstResult<Self> {
        serde_json::from_str(s).map_err(|e| SunburstError::serde(format!("tree json: {e}")))
    }

    /// Read and parse a nested tree JSON file.
    pub fn from_path(path: &Path) -> SunburstResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read tree '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// One row of a parent-pointer table: the flat alternative to [`RawNode`].
///
/// Exactly one row must have no `parent`; every other row names an existing `id` as its parent.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatNode {
    /// Unique row key.
    pub id: String,
    /// Key of the parent row, `None` for the root.
    #[serde(default)]
    pub parent: Option<String>,
    /// Display label.
    #[serde(default)]
    pub name: Option<String>,
    /// Leaf weight.
    #[serde(default)]
    pub value: Option<f64>,
}

impl FlatNode {
    /// Row with a display name and optional weight.
    pub fn new(
        id: impl Into<String>,
        parent: Option<&str>,
        name: impl Into<String>,
        value: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.map(str::to_owned),
            name: Some(name.into()),
            value,
        }
    }

    /// Parse a JSON array of rows.
    pub fn rows_from_json_str(s: &str) -> SunburstResult<Vec<Self>> {
        serde_json::from_str(s).map_err(|e| SunburstError::serde(format!("rows json: {e}")))
    }

    /// Read and parse a JSON array of rows.
    pub fn rows_from_path(path: &Path) -> SunburstResult<Vec<Self>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rows '{}'", path.display()))?;
        Self::rows_from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hierarchy/raw.rs"]
mod tests;
