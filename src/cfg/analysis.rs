//! Grammar lint
//!
//! The engine happily accepts any grammar, but two properties are worth knowing before parsing:
//! left recursion (which makes matching recurse forever) and nonterminals that can never be
//! reached from the start symbol. Nothing here is required for matching; the command line front
//! end uses it to print warnings.
//!
//! Left recursion is looked for in the left-corner graph: `A` has an edge to `X` when some
//! production of `A` is `α X β` with every symbol of `α` nullable. A cycle in that graph means
//! the engine can call (A, p) while already evaluating (A, p). The lint is conservative: the
//! engine's longest-match policy may never actually take the nullable path for a given input.

use super::grammar::{CompiledGrammar, SymbolId};

/// Everything the lint found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarReport {
    /// Nonterminals that can derive the empty string
    pub nullable: Vec<String>,
    /// A left-recursive cycle, first symbol repeated at the end (`S -> T -> S`)
    pub left_recursion: Option<Vec<String>>,
    /// Nonterminals unreachable from the start symbol
    pub unreachable: Vec<String>,
    /// Every terminal mentioned by a production
    pub terminals: Vec<String>,
}

impl GrammarReport {
    pub fn has_warnings(&self) -> bool {
        self.left_recursion.is_some() || !self.unreachable.is_empty()
    }

    /// Human readable warnings, one per line
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(cycle) = &self.left_recursion {
            warnings.push(format!(
                "grammar is left-recursive ({}); parsing may not terminate",
                cycle.join(" -> ")
            ));
        }
        for symbol in &self.unreachable {
            warnings.push(format!("nonterminal '{symbol}' is unreachable from the start symbol"));
        }
        warnings
    }
}

/// Run every check.
pub fn analyze(grammar: &CompiledGrammar) -> GrammarReport {
    let names = |ids: Vec<SymbolId>| -> Vec<String> {
        ids.into_iter()
            .map(|id| grammar.name(id).to_string())
            .collect()
    };

    let nullable = nullable_symbols(grammar);
    let nullable_names = names(
        grammar
            .nonterminals()
            .filter(|id| nullable[id.index()])
            .collect(),
    );

    GrammarReport {
        nullable: nullable_names,
        left_recursion: left_recursion(grammar).map(names),
        unreachable: names(unreachable_symbols(grammar)),
        terminals: names(grammar.terminals().collect()),
    }
}

/// Nullable flags indexed by [`SymbolId::index`]. Terminals are never nullable.
pub fn nullable_symbols(grammar: &CompiledGrammar) -> Vec<bool> {
    let mut nullable = vec![false; grammar.symbol_count()];
    let mut changed = true;
    while changed {
        changed = false;
        for id in grammar.nonterminals() {
            if nullable[id.index()] {
                continue;
            }
            let derives_empty = grammar
                .productions(id)
                .iter()
                .any(|production| production.iter().all(|symbol| nullable[symbol.index()]));
            if derives_empty {
                nullable[id.index()] = true;
                changed = true;
            }
        }
    }
    nullable
}

/// Nonterminals that may be reached at the same position as `symbol`
fn left_corners(grammar: &CompiledGrammar, nullable: &[bool], symbol: SymbolId) -> Vec<SymbolId> {
    let mut corners = Vec::new();
    for production in grammar.productions(symbol) {
        for &candidate in production {
            if !grammar.is_terminal(candidate) && !corners.contains(&candidate) {
                corners.push(candidate);
            }
            if !nullable[candidate.index()] {
                break;
            }
        }
    }
    corners
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Find a cycle in the left-corner graph.
///
/// Returns the cycle with its first symbol repeated at the end, e.g. `[S, S]` for `S -> S a`.
pub fn left_recursion(grammar: &CompiledGrammar) -> Option<Vec<SymbolId>> {
    let nullable = nullable_symbols(grammar);
    let mut marks = vec![Mark::Unvisited; grammar.symbol_count()];
    let mut path = Vec::new();

    for root in grammar.nonterminals() {
        if marks[root.index()] == Mark::Unvisited {
            if let Some(cycle) = find_cycle(grammar, &nullable, root, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn find_cycle(
    grammar: &CompiledGrammar,
    nullable: &[bool],
    symbol: SymbolId,
    marks: &mut [Mark],
    path: &mut Vec<SymbolId>,
) -> Option<Vec<SymbolId>> {
    marks[symbol.index()] = Mark::OnPath;
    path.push(symbol);

    for corner in left_corners(grammar, nullable, symbol) {
        match marks[corner.index()] {
            Mark::OnPath => {
                let start = path.iter().position(|&s| s == corner).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(corner);
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = find_cycle(grammar, nullable, corner, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[symbol.index()] = Mark::Done;
    None
}

/// Nonterminals that no derivation from the start symbol mentions
pub fn unreachable_symbols(grammar: &CompiledGrammar) -> Vec<SymbolId> {
    let Some(start) = grammar.start() else {
        return Vec::new();
    };

    let mut reached = vec![false; grammar.symbol_count()];
    let mut pending = vec![start];
    reached[start.index()] = true;
    while let Some(symbol) = pending.pop() {
        for production in grammar.productions(symbol) {
            for &next in production {
                if !reached[next.index()] {
                    reached[next.index()] = true;
                    pending.push(next);
                }
            }
        }
    }

    grammar
        .nonterminals()
        .filter(|id| !reached[id.index()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::grammar::Grammar;

    fn compile(rules: &str) -> CompiledGrammar {
        Grammar::from_rules(rules).unwrap().compile()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nullable_fixed_point() {
        let grammar = compile("S -> A B\nA -> a | epsilon\nB -> A A\nC -> c");
        let report = analyze(&grammar);
        assert_eq!(report.nullable, strings(&["S", "A", "B"]));
    }

    #[test]
    fn test_direct_left_recursion() {
        let grammar = compile("S -> S a | a");
        let report = analyze(&grammar);
        assert_eq!(report.left_recursion, Some(strings(&["S", "S"])));
        assert!(report.has_warnings());
        assert_eq!(
            report.warnings(),
            vec!["grammar is left-recursive (S -> S); parsing may not terminate".to_string()]
        );
    }

    #[test]
    fn test_indirect_left_recursion_through_nullable_prefix() {
        let grammar = compile("S -> N T\nN -> epsilon\nT -> S x | t");
        let report = analyze(&grammar);
        assert_eq!(report.left_recursion, Some(strings(&["S", "T", "S"])));
    }

    #[test]
    fn test_right_recursion_is_fine() {
        let grammar = compile("S -> a S | epsilon");
        let report = analyze(&grammar);
        assert_eq!(report.left_recursion, None);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_unreachable_nonterminals() {
        let grammar = compile("S -> A\nA -> a\nOrphan -> o");
        let report = analyze(&grammar);
        assert_eq!(report.unreachable, strings(&["Orphan"]));
        assert_eq!(
            report.warnings(),
            vec!["nonterminal 'Orphan' is unreachable from the start symbol".to_string()]
        );
    }

    #[test]
    fn test_terminals_listed() {
        let grammar = compile("S -> a B\nB -> b");
        let report = analyze(&grammar);
        assert_eq!(report.terminals, strings(&["a", "b"]));
    }

    #[test]
    fn test_empty_grammar() {
        let report = analyze(&Grammar::new().compile());
        assert_eq!(report, GrammarReport::default());
    }
}
