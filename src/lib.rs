//! # cfgparse
//!
//! A recognizer for user-supplied context-free grammars.
//!
//! Given a grammar and a whitespace-separated token sequence, the engine decides whether the
//! sequence belongs to the grammar's language and, if it does, rebuilds one derivation tree for
//! it. The derivation is chosen by a fixed policy, so the same grammar and input always produce
//! the same tree.
//!
//! Layout
//!
//! src/cfg
//!   ├── rules       Rule text (`HEAD -> ALT | ALT`) parsing
//!   ├── grammar     The append-only grammar store and its compiled form
//!   ├── engine      Memoized top-down matching and the top-level verdict
//!   ├── tree        Derivation tree values
//!   ├── snapshot    Serializable tree snapshots consumed by the formats
//!   ├── formats     Renderers (dot, treeviz, tag, bracket, json, yaml)
//!   ├── analysis    Grammar lint (nullable symbols, left recursion)
//!   ├── config      Layered configuration loading
//!   └── testing     Fluent tree assertions for tests
//!
//! Quick use:
//!
//! ```text
//! let grammar: Grammar = "S -> A B\nA -> a\nB -> b | epsilon".parse()?;
//! let outcome = grammar.compile().parse("a b");
//! assert!(outcome.is_valid());
//! ```

pub mod cfg;
