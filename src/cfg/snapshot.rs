//! Tree snapshots - a normalized, serializable form of a derivation tree
//!
//! Formats consume snapshots rather than walking [`ParseNode`]s themselves, so each serializer
//! only deals with presentation. Snapshots own their data and can be serialized with `serde`
//! (the json and yaml formats are exactly that).

use super::tree::ParseNode;
use serde::{Deserialize, Serialize};

/// A snapshot of a tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// "Nonterminal", "Terminal" or "Empty"
    pub node_type: String,

    /// The derived symbol, or `epsilon` for the empty marker
    pub label: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<TreeSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot a node and all of its descendants.
///
/// Shared subtrees are expanded at every place they occur.
pub fn snapshot_tree(node: &ParseNode) -> TreeSnapshot {
    TreeSnapshot::new(node.label().kind_name(), node.symbol()).with_children(
        node.children()
            .iter()
            .map(|child| snapshot_tree(child))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_snapshot_structure() {
        let shared = Arc::new(ParseNode::nonterminal(
            "A",
            vec![Arc::new(ParseNode::terminal("a"))],
        ));
        let tree = ParseNode::nonterminal("S", vec![shared.clone(), shared]);

        let snapshot = snapshot_tree(&tree);
        assert_eq!(snapshot.node_type, "Nonterminal");
        assert_eq!(snapshot.label, "S");
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0], snapshot.children[1]);
        assert_eq!(
            snapshot.children[0].children[0],
            TreeSnapshot::new("Terminal", "a")
        );
    }

    #[test]
    fn test_empty_marker_snapshot() {
        let tree = ParseNode::nonterminal("B", vec![Arc::new(ParseNode::empty())]);
        let snapshot = tree.snapshot();
        assert_eq!(
            snapshot,
            TreeSnapshot::new("Nonterminal", "B").with_child(TreeSnapshot::new("Empty", "epsilon"))
        );
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snapshot = TreeSnapshot::new("Nonterminal", "S")
            .with_child(TreeSnapshot::new("Terminal", "a"));
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"node_type":"Nonterminal","label":"S","children":[{"node_type":"Terminal","label":"a"}]}"#
        );
        let back: TreeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
