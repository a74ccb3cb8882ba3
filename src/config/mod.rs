//! Configuration module for sitecheck
//!
//! This module handles the typed configuration, loading it from an optional TOML
//! file, and validating it before any target is crawled. Environment variables and
//! CLI flags are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use sitecheck::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitecheck.toml")).unwrap();
//! println!("Crawling at most {} pages per target", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, TargetsConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config, parse_domain_list};
pub use validation::validate as validate_config;
