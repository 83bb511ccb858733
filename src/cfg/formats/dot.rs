//! Graphviz DOT output
//!
//! Nodes are numbered `node1`, `node2`, ... in depth-first pre-order and labelled with their
//! symbol. Each node is declared right before the edge from its parent, so the output reads in
//! the same order the tree is walked. Feed it to `dot -Tpng` to get an image.

use super::registry::{FormatError, Formatter};
use crate::cfg::snapshot::{snapshot_tree, TreeSnapshot};
use crate::cfg::tree::ParseNode;

struct DotWriter {
    output: String,
    node_count: usize,
}

impl DotWriter {
    fn add_nodes(&mut self, snapshot: &TreeSnapshot, parent: Option<&str>) {
        self.node_count += 1;
        let node_id = format!("node{}", self.node_count);

        self.output.push_str(&format!(
            "  {} [label=\"{}\"];\n",
            node_id,
            escape_label(&snapshot.label)
        ));
        if let Some(parent) = parent {
            self.output
                .push_str(&format!("  {parent} -> {node_id};\n"));
        }

        for child in &snapshot.children {
            self.add_nodes(child, Some(node_id.as_str()));
        }
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn to_dot_str(tree: &ParseNode) -> String {
    let mut writer = DotWriter {
        output: String::from("digraph parse_tree {\n"),
        node_count: 0,
    };
    writer.add_nodes(&snapshot_tree(tree), None);
    writer.output.push_str("}\n");
    writer.output
}

/// Formatter implementation for Graphviz DOT
pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn name(&self) -> &str {
        "dot"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        Ok(to_dot_str(tree))
    }

    fn description(&self) -> &str {
        "Graphviz digraph source, one node per tree node"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_dot_numbering_is_preorder() {
        let tree = ParseNode::nonterminal(
            "S",
            vec![
                Arc::new(ParseNode::nonterminal(
                    "A",
                    vec![Arc::new(ParseNode::terminal("a"))],
                )),
                Arc::new(ParseNode::terminal("b")),
            ],
        );

        let expected = "digraph parse_tree {\n  node1 [label=\"S\"];\n  node2 [label=\"A\"];\n  node1 -> node2;\n  node3 [label=\"a\"];\n  node2 -> node3;\n  node4 [label=\"b\"];\n  node1 -> node4;\n}\n";
        assert_eq!(to_dot_str(&tree), expected);
    }

    #[test]
    fn test_shared_subtrees_get_distinct_ids() {
        let shared = Arc::new(ParseNode::terminal("a"));
        let tree = ParseNode::nonterminal("S", vec![shared.clone(), shared]);
        let output = to_dot_str(&tree);
        assert!(output.contains("node2 [label=\"a\"]"));
        assert!(output.contains("node3 [label=\"a\"]"));
        assert!(output.contains("node1 -> node3;"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let output = to_dot_str(&ParseNode::terminal("say \"hi\""));
        assert!(output.contains(r#"node1 [label="say \"hi\""];"#));
    }
}
