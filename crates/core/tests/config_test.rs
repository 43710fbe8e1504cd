use verdict_core::config::{Config, FormatterConfig, ResolverConfig};

#[test]
fn test_resolver_config_defaults() {
    let config = ResolverConfig::default();
    assert!(config.enabled);
    assert_eq!(config.entry_point, "should");
    assert!(config.source_roots.is_empty());
}

#[test]
fn test_formatter_config_defaults() {
    let config = FormatterConfig::default();
    assert_eq!(config.max_value_len, 200);
}

#[test]
fn test_partial_sections_fill_in_defaults() {
    let config = Config::from_toml_str(
        r#"
        [resolver]
        enabled = false
    "#,
    )
    .expect("Failed to parse TOML");

    assert!(!config.resolver.enabled);
    assert_eq!(config.resolver.entry_point, "should");
    assert_eq!(config.formatter, FormatterConfig::default());
    assert!(config.validate().is_ok());
}
