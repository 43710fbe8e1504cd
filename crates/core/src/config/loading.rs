//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::{Path, PathBuf};

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// A missing file is not an error. Environment variables are prefixed
    /// with `VERDICT_` and use double underscores for nested values:
    /// - `VERDICT_RESOLVER__ENABLED=false`
    /// - `VERDICT_RESOLVER__SOURCE_ROOTS=/work/app,/work/lib`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        let builder = set_config_default(builder, "resolver.enabled", default_resolver_enabled())?;
        let builder = set_config_default(builder, "resolver.entry_point", default_entry_point())?;
        let builder = set_config_default(builder, "resolver.source_roots", Vec::<String>::new())?;
        let mut builder = set_config_default(
            builder,
            "formatter.max_value_len",
            default_max_value_len() as i64,
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("resolver.source_roots")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        let config: Config = config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`--config` path, else `./verdict.toml`, else `~/.verdict/config.toml`)
    /// 3. Environment variables (VERDICT_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        tracing::debug!(path = %path.display(), "Loading verdict configuration");
        Self::from_file(&path)
    }
}

fn default_config_path() -> PathBuf {
    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.exists() {
        return project;
    }
    match global_config_path() {
        Ok(path) => path,
        // Without a home directory only defaults and the environment apply
        Err(_) => project,
    }
}
