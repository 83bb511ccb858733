//! Derivation trees
//!
//! A [`ParseNode`] is one step of a derivation: a nonterminal with the children of the
//! production that was chosen for it, a terminal leaf for a consumed token, or the empty marker
//! that stands in for an empty production.
//!
//! Children are held behind [`Arc`] because the engine memoizes subderivations per
//! (symbol, position) and hands the same subtree to every caller that reaches that subgoal.
//! Trees are therefore immutable once built; sharing is aliasing, never copying.
//!
//! Renderers only need [`ParseNode::symbol`] and [`ParseNode::children`]: walk the tree depth
//! first, give every node an id, and draw one edge per child.

use super::rules::EPSILON;
use super::snapshot::{snapshot_tree, TreeSnapshot};
use std::fmt;
use std::sync::Arc;

/// What a node derives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Nonterminal(Arc<str>),
    Terminal(Arc<str>),
    /// The single child of a node derived through an empty production
    Empty,
}

impl NodeLabel {
    /// The symbol text; `epsilon` for the empty marker
    pub fn symbol(&self) -> &str {
        match self {
            NodeLabel::Nonterminal(name) | NodeLabel::Terminal(name) => name.as_ref(),
            NodeLabel::Empty => EPSILON,
        }
    }

    /// Name of the label's variant, as used by snapshots
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeLabel::Nonterminal(_) => "Nonterminal",
            NodeLabel::Terminal(_) => "Terminal",
            NodeLabel::Empty => "Empty",
        }
    }
}

/// A node of a derivation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    label: NodeLabel,
    children: Vec<Arc<ParseNode>>,
}

impl ParseNode {
    pub fn nonterminal(symbol: impl Into<Arc<str>>, children: Vec<Arc<ParseNode>>) -> Self {
        Self {
            label: NodeLabel::Nonterminal(symbol.into()),
            children,
        }
    }

    pub fn terminal(symbol: impl Into<Arc<str>>) -> Self {
        Self {
            label: NodeLabel::Terminal(symbol.into()),
            children: Vec::new(),
        }
    }

    /// The empty marker leaf
    pub fn empty() -> Self {
        Self {
            label: NodeLabel::Empty,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &NodeLabel {
        &self.label
    }

    pub fn symbol(&self) -> &str {
        self.label.symbol()
    }

    pub fn children(&self) -> &[Arc<ParseNode>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&ParseNode> {
        self.children.get(index).map(Arc::as_ref)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.label, NodeLabel::Terminal(_))
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self.label, NodeLabel::Empty)
    }

    /// Depth-first, pre-order traversal of the tree, starting with `self` at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// The consumed tokens, left to right. Empty markers contribute nothing.
    pub fn leaves(&self) -> Vec<&str> {
        self.walk()
            .map(|(_, node)| node)
            .filter(|node| node.is_terminal())
            .map(ParseNode::symbol)
            .collect()
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        snapshot_tree(self)
    }
}

/// Bracket notation: `S(A(a), B(epsilon))`
impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())?;
        if self.children.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

/// Pre-order iterator over a tree, yielding `(depth, node)`
pub struct Walk<'a> {
    stack: Vec<(usize, &'a ParseNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ParseNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (depth + 1, child.as_ref())),
        );
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: &str) -> Arc<ParseNode> {
        Arc::new(ParseNode::terminal(symbol))
    }

    fn node(symbol: &str, children: Vec<Arc<ParseNode>>) -> Arc<ParseNode> {
        Arc::new(ParseNode::nonterminal(symbol, children))
    }

    fn sample() -> Arc<ParseNode> {
        node(
            "S",
            vec![
                node("A", vec![leaf("a")]),
                node("B", vec![Arc::new(ParseNode::empty())]),
            ],
        )
    }

    #[test]
    fn test_labels() {
        assert_eq!(ParseNode::terminal("a").symbol(), "a");
        assert_eq!(ParseNode::empty().symbol(), "epsilon");
        assert!(ParseNode::empty().is_empty_marker());
        assert!(ParseNode::terminal("a").is_terminal());
        assert!(ParseNode::terminal("a").is_leaf());
        assert_eq!(NodeLabel::Empty.kind_name(), "Empty");
    }

    #[test]
    fn test_display_bracket_notation() {
        assert_eq!(sample().to_string(), "S(A(a), B(epsilon))");
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = sample();
        let order: Vec<(usize, &str)> = tree
            .walk()
            .map(|(depth, node)| (depth, node.symbol()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "S"), (1, "A"), (2, "a"), (1, "B"), (2, "epsilon")]
        );
    }

    #[test]
    fn test_leaves_skip_empty_markers() {
        assert_eq!(sample().leaves(), vec!["a"]);
    }

    #[test]
    fn test_depth_and_count() {
        let tree = sample();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(ParseNode::terminal("x").depth(), 0);
    }

    #[test]
    fn test_child_access() {
        let tree = sample();
        assert_eq!(tree.child(0).map(ParseNode::symbol), Some("A"));
        assert_eq!(tree.child(1).map(ParseNode::symbol), Some("B"));
        assert!(tree.child(2).is_none());
    }
}
