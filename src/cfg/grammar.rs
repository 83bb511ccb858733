//! Grammar store
//!
//! A [`Grammar`] maps nonterminal heads to their ordered productions. There is no declaration
//! step for terminals: a symbol that never appears as a head is a terminal and is matched
//! literally against one input token. Undefined symbols are therefore not an error, they are
//! how terminals come into existence.
//!
//! The store is append-only. Defining a head again appends the new alternatives after the
//! existing ones, and the head of the very first definition becomes the start symbol for good.
//!
//! [`Grammar::compile`] freezes the store into a [`CompiledGrammar`]: every symbol is interned
//! once into a [`SymbolId`] and tagged as terminal or nonterminal, so the engine never repeats
//! the membership lookup while matching.

use super::rules::{parse_rule, parse_rules, GrammarError, Rule, RuleError, EPSILON};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A grammar symbol. Opaque text; its class depends only on the grammar it is looked up in.
pub type Symbol = String;

/// One alternative expansion of a nonterminal
///
/// A production with no symbols is the empty production.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// The empty production
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Production {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EPSILON);
        }
        f.write_str(&self.symbols.join(" "))
    }
}

/// The append-only grammar store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    productions: HashMap<Symbol, Vec<Production>>,
    /// Heads in the order they were first defined
    heads: Vec<Symbol>,
    start: Option<Symbol>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grammar from a rules document (one `HEAD -> ALT | ALT` rule per line).
    pub fn from_rules(text: &str) -> Result<Self, GrammarError> {
        let mut grammar = Self::new();
        for rule in parse_rules(text)? {
            grammar.add(rule);
        }
        Ok(grammar)
    }

    /// Append `alternatives` to the productions of `head`.
    ///
    /// Creates the entry when `head` is new and fixes the start symbol on the first call. No
    /// validation happens here; symbols that are never defined end up as terminals.
    pub fn define<H, I>(&mut self, head: H, alternatives: I)
    where
        H: Into<Symbol>,
        I: IntoIterator<Item = Production>,
    {
        let head = head.into();
        if self.start.is_none() {
            self.start = Some(head.clone());
        }
        match self.productions.get_mut(&head) {
            Some(existing) => existing.extend(alternatives),
            None => {
                self.heads.push(head.clone());
                self.productions
                    .insert(head, alternatives.into_iter().collect());
            }
        }
    }

    /// Parse one rule line and define it. A malformed rule leaves the grammar untouched.
    pub fn add_rule(&mut self, text: &str) -> Result<(), RuleError> {
        let rule = parse_rule(text)?;
        self.add(rule);
        Ok(())
    }

    pub fn add(&mut self, rule: Rule) {
        self.define(rule.head, rule.alternatives);
    }

    /// Productions of `symbol`, or `None` when it is a terminal
    pub fn get(&self, symbol: &str) -> Option<&[Production]> {
        self.productions.get(symbol).map(Vec::as_slice)
    }

    /// Productions of `symbol`; empty for terminals
    pub fn productions(&self, symbol: &str) -> &[Production] {
        self.get(symbol).unwrap_or(&[])
    }

    pub fn is_nonterminal(&self, symbol: &str) -> bool {
        self.productions.contains_key(symbol)
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        !self.is_nonterminal(symbol)
    }

    pub fn start_symbol(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Nonterminals in first-definition order
    pub fn heads(&self) -> impl Iterator<Item = &str> + '_ {
        self.heads.iter().map(String::as_str)
    }

    /// Number of nonterminals
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Freeze the grammar, resolving every symbol to a terminal or nonterminal.
    pub fn compile(&self) -> CompiledGrammar {
        CompiledGrammar::new(self)
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rules(s)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for head in &self.heads {
            let alternatives = self.productions(head)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{head} -> {alternatives}")?;
        }
        Ok(())
    }
}

/// Index of an interned symbol inside a [`CompiledGrammar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The resolved class of a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    Nonterminal { productions: Vec<Vec<SymbolId>> },
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    name: Arc<str>,
    kind: SymbolKind,
}

/// An immutable, interned view of a [`Grammar`]
///
/// Heads get the lowest ids in definition order, followed by the remaining (terminal) symbols in
/// order of first appearance. The compiled grammar is `Send + Sync`; concurrent parses can
/// share it as long as each one uses its own memo table, which the engine guarantees.
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    symbols: Vec<SymbolEntry>,
    ids: HashMap<Arc<str>, SymbolId>,
    start: Option<SymbolId>,
}

impl CompiledGrammar {
    fn new(grammar: &Grammar) -> Self {
        let mut names: Vec<Arc<str>> = Vec::new();
        let mut ids: HashMap<Arc<str>, SymbolId> = HashMap::new();
        let mut intern = |name: &str| -> SymbolId {
            if let Some(id) = ids.get(name) {
                return *id;
            }
            let id = SymbolId(names.len());
            let name: Arc<str> = Arc::from(name);
            names.push(name.clone());
            ids.insert(name, id);
            id
        };

        for head in grammar.heads() {
            intern(head);
        }

        let mut resolved = Vec::with_capacity(grammar.len());
        for head in grammar.heads() {
            let productions = grammar
                .productions(head)
                .iter()
                .map(|production| {
                    production
                        .symbols()
                        .iter()
                        .map(|s| intern(s.as_str()))
                        .collect()
                })
                .collect::<Vec<Vec<SymbolId>>>();
            resolved.push(productions);
        }

        let mut resolved = resolved.into_iter();
        let symbols = names
            .into_iter()
            .map(|name| {
                let kind = match resolved.next() {
                    Some(productions) => SymbolKind::Nonterminal { productions },
                    None => SymbolKind::Terminal,
                };
                SymbolEntry { name, kind }
            })
            .collect();

        let start = grammar
            .start_symbol()
            .and_then(|name| ids.get(name).copied());

        Self {
            symbols,
            ids,
            start,
        }
    }

    /// The id of a symbol mentioned anywhere in the grammar
    pub fn id(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// The id of `token` when it names a terminal of this grammar
    pub fn terminal_id(&self, token: &str) -> Option<SymbolId> {
        self.id(token).filter(|id| self.is_terminal(*id))
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0].name
    }

    pub(crate) fn shared_name(&self, id: SymbolId) -> &Arc<str> {
        &self.symbols[id.0].name
    }

    pub fn kind(&self, id: SymbolId) -> &SymbolKind {
        &self.symbols[id.0].kind
    }

    pub fn is_terminal(&self, id: SymbolId) -> bool {
        matches!(self.kind(id), SymbolKind::Terminal)
    }

    /// Productions of `id`; empty for terminals
    pub fn productions(&self, id: SymbolId) -> &[Vec<SymbolId>] {
        match self.kind(id) {
            SymbolKind::Nonterminal { productions } => productions,
            SymbolKind::Terminal => &[],
        }
    }

    pub fn start(&self) -> Option<SymbolId> {
        self.start
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.symbols.len()).map(SymbolId)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols().filter(|id| !self.is_terminal(*id))
    }

    pub fn terminals(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols().filter(|id| self.is_terminal(*id))
    }
}
