//! XML-like tag serialization
//!
//! - Node type → tag name (lowercase)
//! - Label → text content
//! - Children → nested tags
//!
//! ```text
//! <tree>
//!   <nonterminal>S
//!     <nonterminal>A
//!       <terminal>a</terminal>
//!     </nonterminal>
//!   </nonterminal>
//! </tree>
//! ```

use super::registry::{FormatError, Formatter};
use crate::cfg::snapshot::{snapshot_tree, TreeSnapshot};
use crate::cfg::tree::ParseNode;

struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn new(indent_level: usize) -> Self {
        Self {
            output: String::new(),
            indent_level,
        }
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&"  ".repeat(self.indent_level));
        self.output.push_str(s);
    }

    fn serialize_snapshot(&mut self, snapshot: &TreeSnapshot) {
        let tag = snapshot.node_type.to_lowercase();

        self.push_indent(&format!("<{tag}>"));
        self.output.push_str(&escape_xml(&snapshot.label));

        if snapshot.children.is_empty() {
            self.output.push_str(&format!("</{tag}>\n"));
            return;
        }

        self.output.push('\n');
        self.indent_level += 1;
        for child in &snapshot.children {
            self.serialize_snapshot(child);
        }
        self.indent_level -= 1;
        self.push_indent(&format!("</{tag}>\n"));
    }
}

/// Serialize a tree to tag format
pub fn serialize_tree(tree: &ParseNode) -> String {
    let mut serializer = TagSerializer::new(1);
    serializer.serialize_snapshot(&snapshot_tree(tree));

    format!("<tree>\n{}</tree>\n", serializer.output)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// Formatter implementation for the XML-like tag format
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        Ok(serialize_tree(tree))
    }

    fn description(&self) -> &str {
        "XML-like tag format with hierarchical structure"
    }
}
