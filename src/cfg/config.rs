//! Configuration loading
//!
//! `defaults/cfgparse.default.toml` is embedded into the binary so that documented defaults and
//! runtime behavior stay in sync. Callers layer user files and single-key overrides on top via
//! [`Loader`] before deserializing into [`CfgParseConfig`].

use super::engine::ParseOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/cfgparse.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CfgParseConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Matching engine knobs
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Recursion guard; 0 means unlimited
    pub max_depth: usize,
}

impl ParserConfig {
    pub fn parse_options(&self) -> ParseOptions {
        match self.max_depth {
            0 => ParseOptions::new(),
            limit => ParseOptions::new().with_max_depth(limit),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of a registered tree format
    pub format: String,
    pub show_stats: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CfgParseConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CfgParseConfig, ConfigError> {
    Loader::new().build()
}
