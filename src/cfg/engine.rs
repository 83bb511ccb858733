//! Matching engine
//!
//! Memoized top-down matching of grammar symbols against a token sequence.
//!
//! Matching a symbol at a position works as follows:
//!
//! 1. If (symbol, position) is already in the memo table, the cached result is returned as is,
//!    tree included. Callers that reach the same subgoal share one subtree.
//! 2. A terminal matches iff the token at `position` is the terminal itself, advancing by one.
//! 3. A nonterminal tries every production in definition order. An empty production succeeds
//!    without consuming anything. A non-empty production matches its symbols left to right,
//!    each starting where the previous one ended, and fails as a whole as soon as one symbol
//!    fails. There is no search over alternative split points inside a production.
//!
//! Among the successful productions the engine keeps the last one whose end position is greater
//! than or equal to the best end seen so far. The running best starts as a failure ending at
//! `position`, so longer matches win and ties go to the later alternative. The choice is made
//! locally per symbol, without looking at what the enclosing production needs next; for some
//! ambiguous grammars that means a valid sentence is rejected. This is the engine's defined
//! behavior.
//!
//! A top-level parse tokenizes the input on whitespace, builds a fresh [`Matcher`] (and with it a
//! fresh memo table), matches the start symbol at 0 and accepts only when the whole input was
//! consumed.
//!
//! Left recursion reachable before any token is consumed recurses forever. There is no default
//! limit; [`ParseOptions::with_max_depth`] installs a guard that stops descending and reports
//! [`Verdict::DepthExceeded`] instead of exhausting the stack.

use super::grammar::{CompiledGrammar, SymbolId, SymbolKind};
use super::tree::ParseNode;
use std::fmt;
use std::sync::Arc;

/// Split input text into tokens on whitespace.
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

/// The result of matching one symbol at one position
///
/// A successful result always carries a tree. `end` is the position right after the match, or
/// the starting position for a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    tree: Option<Arc<ParseNode>>,
    end: usize,
}

impl MatchResult {
    fn success(tree: Arc<ParseNode>, end: usize) -> Self {
        Self {
            tree: Some(tree),
            end,
        }
    }

    fn failure(position: usize) -> Self {
        Self {
            tree: None,
            end: position,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> Option<&Arc<ParseNode>> {
        self.tree.as_ref()
    }

    pub fn into_tree(self) -> Option<Arc<ParseNode>> {
        self.tree
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// Counters collected over one parse invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Every entry into [`Matcher::match_symbol`]
    pub calls: usize,
    /// Calls answered from the memo table
    pub memo_hits: usize,
    /// Calls that actually matched a terminal or tried productions
    pub evaluations: usize,
    /// Deepest recursion reached
    pub max_depth: usize,
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "calls={} memo_hits={} evaluations={} max_depth={}",
            self.calls, self.memo_hits, self.evaluations, self.max_depth
        )
    }
}

/// Knobs for a parse invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum recursion depth; `None` means unlimited
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail closed once the recursion gets deeper than `limit`.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

/// Cached results keyed by (symbol, position), one slot per pair
struct MemoTable {
    width: usize,
    slots: Vec<Option<MatchResult>>,
}

impl MemoTable {
    fn new(symbol_count: usize, token_count: usize) -> Self {
        let width = token_count + 1;
        Self {
            width,
            slots: vec![None; symbol_count * width],
        }
    }

    fn slot(&self, symbol: SymbolId, position: usize) -> usize {
        symbol.index() * self.width + position
    }

    fn get(&self, symbol: SymbolId, position: usize) -> Option<&MatchResult> {
        self.slots[self.slot(symbol, position)].as_ref()
    }

    fn insert(&mut self, symbol: SymbolId, position: usize, result: MatchResult) {
        let slot = self.slot(symbol, position);
        self.slots[slot] = Some(result);
    }
}

/// One matching scope: a grammar, a token sequence and the memo table for them
///
/// The memo table lives and dies with the matcher. Create a new matcher for every input.
pub struct Matcher<'g> {
    grammar: &'g CompiledGrammar,
    /// Tokens resolved to terminal ids; `None` for tokens no terminal can match
    tokens: Vec<Option<SymbolId>>,
    memo: MemoTable,
    max_depth: Option<usize>,
    depth: usize,
    overflowed: bool,
    stats: MatchStats,
}

impl<'g> Matcher<'g> {
    pub fn new<S: AsRef<str>>(grammar: &'g CompiledGrammar, tokens: &[S]) -> Self {
        let tokens: Vec<Option<SymbolId>> = tokens
            .iter()
            .map(|token| grammar.terminal_id(token.as_ref()))
            .collect();
        let memo = MemoTable::new(grammar.symbol_count(), tokens.len());
        Self {
            grammar,
            tokens,
            memo,
            max_depth: None,
            depth: 0,
            overflowed: false,
            stats: MatchStats::default(),
        }
    }

    pub fn with_options(mut self, options: &ParseOptions) -> Self {
        self.max_depth = options.max_depth;
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    /// The depth limit that was hit, if any
    pub fn depth_exceeded(&self) -> Option<usize> {
        if self.overflowed {
            self.max_depth
        } else {
            None
        }
    }

    /// Match `symbol` starting at `position`.
    ///
    /// Positions past the end of the input always fail, and so do ids that belong to another
    /// grammar.
    pub fn match_symbol(&mut self, symbol: SymbolId, position: usize) -> MatchResult {
        if position > self.token_count() || symbol.index() >= self.grammar.symbol_count() {
            return MatchResult::failure(position);
        }

        self.stats.calls += 1;
        if let Some(cached) = self.memo.get(symbol, position) {
            self.stats.memo_hits += 1;
            return cached.clone();
        }

        if self.overflowed {
            return MatchResult::failure(position);
        }
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                self.overflowed = true;
                return MatchResult::failure(position);
            }
        }

        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        self.stats.evaluations += 1;

        let grammar = self.grammar;
        let result = match grammar.kind(symbol) {
            SymbolKind::Terminal => self.match_terminal(symbol, position),
            SymbolKind::Nonterminal { productions } => {
                self.match_nonterminal(symbol, productions, position)
            }
        };

        self.depth -= 1;
        // Results computed while the guard fired may be truncated
        if !self.overflowed {
            self.memo.insert(symbol, position, result.clone());
        }
        result
    }

    fn match_terminal(&self, symbol: SymbolId, position: usize) -> MatchResult {
        match self.tokens.get(position) {
            Some(Some(token)) if *token == symbol => {
                let leaf = ParseNode::terminal(self.grammar.shared_name(symbol).clone());
                MatchResult::success(Arc::new(leaf), position + 1)
            }
            _ => MatchResult::failure(position),
        }
    }

    fn match_nonterminal(
        &mut self,
        symbol: SymbolId,
        productions: &[Vec<SymbolId>],
        position: usize,
    ) -> MatchResult {
        let grammar = self.grammar;
        let name = grammar.shared_name(symbol);
        let mut best = MatchResult::failure(position);

        for production in productions {
            let candidate = if production.is_empty() {
                let node = ParseNode::nonterminal(name.clone(), vec![Arc::new(ParseNode::empty())]);
                MatchResult::success(Arc::new(node), position)
            } else {
                match self.match_sequence(production, position) {
                    Some((children, end)) => {
                        let node = ParseNode::nonterminal(name.clone(), children);
                        MatchResult::success(Arc::new(node), end)
                    }
                    None => continue,
                }
            };

            if candidate.end >= best.end {
                best = candidate;
            }
        }

        best
    }

    /// Match every symbol of a production in order, threading the end positions.
    fn match_sequence(
        &mut self,
        production: &[SymbolId],
        position: usize,
    ) -> Option<(Vec<Arc<ParseNode>>, usize)> {
        let mut children = Vec::with_capacity(production.len());
        let mut current = position;
        for &symbol in production {
            let result = self.match_symbol(symbol, current);
            current = result.end;
            children.push(result.into_tree()?);
        }
        Some((children, current))
    }
}

/// The final answer for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The start symbol derived the whole input
    Accepted,
    /// No derivation of the whole input was found
    Rejected,
    /// The recursion guard fired before matching finished
    DepthExceeded { limit: usize },
}

/// Result of a top-level parse
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    verdict: Verdict,
    tree: Option<Arc<ParseNode>>,
    consumed: Option<usize>,
    token_count: usize,
    stats: MatchStats,
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// The derivation tree; present only for accepted input
    pub fn tree(&self) -> Option<&Arc<ParseNode>> {
        self.tree.as_ref()
    }

    pub fn into_tree(self) -> Option<Arc<ParseNode>> {
        self.tree
    }

    /// How many tokens the start symbol matched, when it matched at all
    pub fn consumed(&self) -> Option<usize> {
        self.consumed
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// True when the start symbol matched but stopped short of the end of the input
    pub fn is_partial(&self) -> bool {
        matches!(self.consumed, Some(consumed) if consumed < self.token_count)
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }
}

/// Parse a pre-tokenized input against `grammar`.
pub fn parse_tokens<S: AsRef<str>>(
    grammar: &CompiledGrammar,
    tokens: &[S],
    options: &ParseOptions,
) -> ParseOutcome {
    let token_count = tokens.len();
    let Some(start) = grammar.start() else {
        return ParseOutcome {
            verdict: Verdict::Rejected,
            tree: None,
            consumed: None,
            token_count,
            stats: MatchStats::default(),
        };
    };

    let mut matcher = Matcher::new(grammar, tokens).with_options(options);
    let result = matcher.match_symbol(start, 0);
    let stats = matcher.stats();

    if let Some(limit) = matcher.depth_exceeded() {
        return ParseOutcome {
            verdict: Verdict::DepthExceeded { limit },
            tree: None,
            consumed: None,
            token_count,
            stats,
        };
    }

    let consumed = result.succeeded().then_some(result.end());
    let (verdict, tree) = if consumed == Some(token_count) {
        (Verdict::Accepted, result.into_tree())
    } else {
        (Verdict::Rejected, None)
    };

    ParseOutcome {
        verdict,
        tree,
        consumed,
        token_count,
        stats,
    }
}

/// Tokenize `input` on whitespace and parse it against `grammar`.
pub fn parse(grammar: &CompiledGrammar, input: &str, options: &ParseOptions) -> ParseOutcome {
    parse_tokens(grammar, &tokenize(input), options)
}

impl CompiledGrammar {
    /// Parse `input` with default options (no depth limit).
    pub fn parse(&self, input: &str) -> ParseOutcome {
        parse(self, input, &ParseOptions::default())
    }

    pub fn parse_with(&self, input: &str, options: &ParseOptions) -> ParseOutcome {
        parse(self, input, options)
    }

    /// A matcher over `tokens` with its own, fresh memo table
    pub fn matcher<S: AsRef<str>>(&self, tokens: &[S]) -> Matcher<'_> {
        Matcher::new(self, tokens)
    }
}
