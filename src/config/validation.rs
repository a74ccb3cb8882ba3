use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_targets(config)?;
    validate_crawler_config(&config.crawler)?;
    validate_ignore_domains(&config.ignore_domains)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the configured site roots
fn validate_targets(config: &Config) -> Result<(), ConfigError> {
    if config.targets.base_url.trim().is_empty() {
        return Err(ConfigError::MissingTarget);
    }

    for target in config.targets() {
        validate_target_url(&target)?;
    }

    Ok(())
}

/// Validates that a target is an absolute HTTP(S) URL with a host
fn validate_target_url(target: &str) -> Result<(), ConfigError> {
    let url = Url::parse(target)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", target, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Target URL '{}' must use http or https",
            target
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Target URL '{}' has no host",
            target
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be >= 1, got {}",
            config.timeout_ms
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_redirects < 1 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be >= 1, got {}",
            config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates ignore-domain entries
fn validate_ignore_domains(domains: &[String]) -> Result<(), ConfigError> {
    for domain in domains {
        if domain.is_empty() || domain.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "Invalid ignore-domain entry '{}'",
                domain
            )));
        }
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report_dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}
