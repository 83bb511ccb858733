//! Testing utilities for derivation trees
//!
//! Comparing whole trees by hand gets noisy fast. [`assert_tree`] gives a fluent, path-aware
//! way to check the parts a test cares about, and failure messages say where in the tree the
//! mismatch is:
//!
//! ```rust,ignore
//! use cfgparse::cfg::testing::assert_tree;
//!
//! let outcome = grammar.compile().parse("a b");
//! assert_tree(outcome.tree().unwrap())
//!     .nonterminal("S")
//!     .child_count(2)
//!     .child(0, |a| {
//!         a.nonterminal("A").child(0, |leaf| {
//!             leaf.terminal("a");
//!         });
//!     })
//!     .bracket("S(A(a), B(b))");
//! ```

use super::tree::{NodeLabel, ParseNode};

/// Start a chain of assertions on `tree`.
pub fn assert_tree(tree: &ParseNode) -> TreeAssertion<'_> {
    TreeAssertion {
        node: tree,
        context: tree.symbol().to_string(),
    }
}

pub struct TreeAssertion<'a> {
    node: &'a ParseNode,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    /// Assert the node is the nonterminal `symbol`
    pub fn nonterminal(self, symbol: &str) -> Self {
        assert!(
            matches!(self.node.label(), NodeLabel::Nonterminal(name) if name.as_ref() == symbol),
            "{}: Expected nonterminal '{}', found {:?}",
            self.context,
            symbol,
            self.node.label()
        );
        self
    }

    /// Assert the node is a leaf for the terminal `symbol`
    pub fn terminal(self, symbol: &str) -> Self {
        assert!(
            matches!(self.node.label(), NodeLabel::Terminal(name) if name.as_ref() == symbol),
            "{}: Expected terminal '{}', found {:?}",
            self.context,
            symbol,
            self.node.label()
        );
        self
    }

    /// Assert the node is the empty marker
    pub fn empty_marker(self) -> Self {
        assert!(
            self.node.is_empty_marker(),
            "{}: Expected empty marker, found {:?}",
            self.context,
            self.node.label()
        );
        self
    }

    /// Assert the node derives the empty string through an empty production
    pub fn derives_empty(self) -> Self {
        assert!(
            self.node.children().len() == 1 && self.node.children()[0].is_empty_marker(),
            "{}: Expected a single empty marker child, found {}",
            self.context,
            self.node
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, found {}: {}",
            self.context, expected, actual, self.node
        );
        self
    }

    /// Assert on a specific child
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let node: &'a ParseNode = self.node;
        let child = node.child(index).unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds ({} children)",
                self.context,
                index,
                node.children().len()
            )
        });
        assertion(TreeAssertion {
            node: child,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Assert the consumed tokens, left to right
    pub fn leaves(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node.leaves(),
            expected,
            "{}: Unexpected leaves",
            self.context
        );
        self
    }

    /// Assert the whole subtree in bracket notation
    pub fn bracket(self, expected: &str) -> Self {
        assert_eq!(
            self.node.to_string(),
            expected,
            "{}: Unexpected subtree",
            self.context
        );
        self
    }

    pub fn depth(self, expected: usize) -> Self {
        assert_eq!(
            self.node.depth(),
            expected,
            "{}: Unexpected depth for {}",
            self.context,
            self.node
        );
        self
    }
}
