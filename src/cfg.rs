//! Main module for cfgparse library functionality

pub mod analysis;
pub mod config;
pub mod engine;
pub mod formats;
pub mod grammar;
pub mod rules;
pub mod snapshot;
pub mod testing;
pub mod tree;

pub use engine::{
    parse, parse_tokens, tokenize, MatchResult, MatchStats, Matcher, ParseOptions, ParseOutcome,
    Verdict,
};
pub use grammar::{CompiledGrammar, Grammar, Production, Symbol, SymbolId, SymbolKind};
pub use rules::{parse_rule, parse_rules, GrammarError, Rule, RuleError, EPSILON};
pub use tree::{NodeLabel, ParseNode};
