use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads, parses and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Parses TOML configuration text without validating it
///
/// Ignore-domain entries are trimmed and lowercased and empty entries dropped, so
/// the result can still be layered with environment and CLI overrides before
/// validation.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;
    config.ignore_domains = config
        .ignore_domains
        .iter()
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect();
    Ok(config)
}

/// Splits a comma-separated domain list into trimmed, lowercase, non-empty entries
///
/// # Examples
///
/// ```
/// use sitecheck::config::parse_domain_list;
///
/// assert_eq!(
///     parse_domain_list(" LinkedIn.com, ,twitter.com "),
///     vec!["linkedin.com".to_string(), "twitter.com".to_string()]
/// );
/// ```
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
