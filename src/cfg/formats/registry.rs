//! Named tree renderers
//!
//! A [`Formatter`] turns one derivation tree into text. The [`FormatRegistry`] maps the names a
//! user types (`--format dot`) to formatters and keeps them sorted by name, which is the order
//! `--list-formats` prints them in.

use crate::cfg::tree::ParseNode;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under this name
    UnknownFormat(String),
    /// The formatter could not produce output for the tree
    Render(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(f, "unknown tree format '{name}'"),
            FormatError::Render(msg) => write!(f, "failed to render tree: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

pub trait Formatter: Send + Sync {
    /// Lookup key, also shown by `--list-formats`
    fn name(&self) -> &str;

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError>;

    /// One line for `--list-formats`
    fn description(&self) -> &str {
        ""
    }
}

#[derive(Default)]
pub struct FormatRegistry {
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// An empty registry. See [`FormatRegistry::with_defaults`] for the built-in formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in format: bracket, dot, json, tag, treeviz and yaml
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::BracketFormatter);
        registry.register(super::DotFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::TagFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    /// Add `formatter` under its own name, handing back the one it displaces.
    pub fn register<F>(&mut self, formatter: F) -> Option<Box<dyn Formatter>>
    where
        F: Formatter + 'static,
    {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render `tree` with the formatter registered as `format`.
    pub fn serialize(&self, tree: &ParseNode, format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::UnknownFormat(format.to_string()))?
            .serialize(tree)
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }

    /// Registered formatters, sorted by name
    pub fn formats(&self) -> impl Iterator<Item = &(dyn Formatter + 'static)> + '_ {
        self.formatters.values().map(Box::as_ref)
    }
}
