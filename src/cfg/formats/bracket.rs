//! Bracket notation: `S(A(a), B(epsilon))`
//!
//! Compact and single-line, handy for logs and test expectations. This is the `Display` output
//! of [`ParseNode`].

use super::registry::{FormatError, Formatter};
use crate::cfg::tree::ParseNode;

pub struct BracketFormatter;

impl Formatter for BracketFormatter {
    fn name(&self) -> &str {
        "bracket"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        Ok(format!("{tree}\n"))
    }

    fn description(&self) -> &str {
        "Single-line bracket notation"
    }
}
