//! Sitecheck: a link and asset validator for deployed websites
//!
//! This crate crawls one or more site roots breadth-first, follows every redirect
//! by hand so chains and loops can be reported, checks each referenced link and
//! asset exactly once per target, and audits basic discoverability metadata.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for sitecheck operations
#[derive(Debug, Error)]
pub enum SiteCheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("No target URL provided. Use --base or LINK_CHECK_BASE.")]
    MissingTarget,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitecheck operations
pub type Result<T> = std::result::Result<T, SiteCheckError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_link_check, run_site_check, FetchOutcome};
pub use report::{LinkReport, SiteReport, Summary};
pub use state::{CrawlPhase, CrawlState};
pub use url::{classify_asset, is_internal, normalize_url, AssetKind};
