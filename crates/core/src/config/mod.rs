//! Configuration module for verdict
//!
//! Configuration can be loaded from TOML files and/or environment variables.
//! Every field has a default, so an absent file is a valid configuration.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::PROJECT_CONFIG_FILE;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.verdict/config.toml` and applies to
/// every project without its own `verdict.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".verdict").join("config.toml"))
}

/// Caller-context resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Whether failed checks re-parse their source file for a context line
    #[serde(default = "default_resolver_enabled")]
    pub enabled: bool,

    /// Name of the fluent entry point that turns a value into a subject
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Extra directories that compiler-reported relative paths are tried against
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: default_resolver_enabled(),
            entry_point: default_entry_point(),
            source_roots: Vec::new(),
        }
    }
}

/// Failure message configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Longest actual/expected description printed before clipping with `...`
    #[serde(default = "default_max_value_len")]
    pub max_value_len: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_value_len: default_max_value_len(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolver configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Formatter configuration
    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.resolver.entry_point) {
            return Err(Error::config(format!(
                "Invalid entry point '{}'. Must be a Rust identifier",
                self.resolver.entry_point
            )));
        }

        if self.formatter.max_value_len < MIN_MAX_VALUE_LEN {
            return Err(Error::config(format!(
                "Invalid max_value_len {}. Must be at least {MIN_MAX_VALUE_LEN}",
                self.formatter.max_value_len
            )));
        }

        Ok(())
    }

    /// Serializes the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
