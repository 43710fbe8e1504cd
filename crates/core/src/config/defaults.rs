//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_ENTRY_POINT: &str = "should";
pub(crate) const DEFAULT_MAX_VALUE_LEN: usize = 200;
pub(crate) const MIN_MAX_VALUE_LEN: usize = 8;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "verdict.toml";

/// Prefix of configuration environment variables
pub(crate) const ENV_PREFIX: &str = "VERDICT";

pub(crate) fn default_resolver_enabled() -> bool {
    true
}

pub(crate) fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}

pub(crate) fn default_max_value_len() -> usize {
    DEFAULT_MAX_VALUE_LEN
}
