//! Rule text parsing
//!
//! Rules are written one per line as `HEAD -> ALT1 | ALT2 | ...`. Each alternative is a
//! whitespace-separated list of symbols. An alternative that is exactly `epsilon`, or blank,
//! denotes the empty production. `epsilon` next to other symbols is just a terminal that
//! happens to be spelled `epsilon`.
//!
//! Rules documents are a sequence of such lines. Blank lines and lines starting with `#` are
//! skipped.

use super::grammar::{Production, Symbol};
use std::fmt;

/// The keyword for the empty production, also used as the label of the empty marker node.
pub const EPSILON: &str = "epsilon";

/// Separator between the head and the alternatives of a rule.
pub const ARROW: &str = "->";

/// Separator between alternatives.
pub const ALTERNATIVE_SEPARATOR: char = '|';

const COMMENT_PREFIX: char = '#';

/// A parsed rule: one head and its alternatives in written order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub head: Symbol,
    pub alternatives: Vec<Production>,
}

/// Error for a single malformed rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule has no `->` separator
    MissingArrow { rule: String },
    /// The rule has more than one `->` separator
    MultipleArrows { rule: String },
    /// Nothing precedes the `->` separator
    EmptyHead { rule: String },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::MissingArrow { rule } => {
                write!(f, "rule '{rule}' is missing the '{ARROW}' separator")
            }
            RuleError::MultipleArrows { rule } => {
                write!(f, "rule '{rule}' has more than one '{ARROW}' separator")
            }
            RuleError::EmptyHead { rule } => write!(f, "rule '{rule}' has no head symbol"),
        }
    }
}

impl std::error::Error for RuleError {}

/// A malformed line inside a rules document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// 1-based line number of the offending rule
    pub line: usize,
    pub error: RuleError,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Parse a single `HEAD -> ALT | ALT` rule.
pub fn parse_rule(text: &str) -> Result<Rule, RuleError> {
    let rule = text.trim();
    let (head, body) = rule
        .split_once(ARROW)
        .ok_or_else(|| RuleError::MissingArrow {
            rule: rule.to_string(),
        })?;

    if body.contains(ARROW) {
        return Err(RuleError::MultipleArrows {
            rule: rule.to_string(),
        });
    }

    let head = head.trim();
    if head.is_empty() {
        return Err(RuleError::EmptyHead {
            rule: rule.to_string(),
        });
    }

    let alternatives = body
        .split(ALTERNATIVE_SEPARATOR)
        .map(parse_alternative)
        .collect();

    Ok(Rule {
        head: head.to_string(),
        alternatives,
    })
}

fn parse_alternative(text: &str) -> Production {
    let text = text.trim();
    if text == EPSILON {
        return Production::empty();
    }
    text.split_whitespace().collect()
}

/// Parse a rules document, stopping at the first malformed line.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, GrammarError> {
    let mut rules = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let rule = parse_rule(trimmed).map_err(|error| GrammarError {
            line: index + 1,
            error,
        })?;
        rules.push(rule);
    }
    Ok(rules)
}
