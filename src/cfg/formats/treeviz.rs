//! Treeviz formatter for derivation trees
//!
//! One line per node, nesting drawn with box connectors, two columns per level:
//!
//! ```text
//! ◆ S
//! ├─ ◆ A
//! │ └─ ◦ a
//! └─ ◆ B
//!   └─ ε epsilon
//! ```
//!
//! Icons
//!     Nonterminal: ◆
//!     Terminal: ◦
//!     Empty: ε

use super::registry::{FormatError, Formatter};
use crate::cfg::snapshot::{snapshot_tree, TreeSnapshot};
use crate::cfg::tree::ParseNode;

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Nonterminal" => "◆",
        "Terminal" => "◦",
        "Empty" => "ε",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &TreeSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon,
        truncate(&snapshot.label, MAX_LABEL_CHARS)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

pub fn to_treeviz_str(tree: &ParseNode) -> String {
    let snapshot = snapshot_tree(tree);
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, MAX_LABEL_CHARS)
    );

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
