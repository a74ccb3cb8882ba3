//! Crawler module for link and asset validation
//!
//! This module contains the core checking logic, including:
//! - HTTP fetching with manual redirect resolution
//! - HTML parsing for references and metadata
//! - Per-target crawl coordination
//! - Sequential multi-target runs merged into one report

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_site_check, Coordinator};
pub use fetcher::{build_http_client, resolve_with_redirects, FetchOutcome, Fetcher, RedirectHop};
pub use parser::{extract_metadata, extract_references, PageMetadata, Reference, ReferenceKind};

use crate::config::Config;
use crate::report::{LinkReport, ReportConfig};
use crate::{ConfigError, Result};

/// Runs a complete link check over every configured target
///
/// Targets are crawled strictly one after another, each with its own crawl
/// state; nothing is cached across targets. The per-target reports are then
/// merged and the summary recomputed.
///
/// # Arguments
///
/// * `config` - The validated run configuration
///
/// # Returns
///
/// * `Ok(LinkReport)` - The merged report (broken links are data, not errors)
/// * `Err(SiteCheckError)` - No target configured, or the HTTP client could not be built
pub async fn run_link_check(config: &Config) -> Result<LinkReport> {
    let targets = config.targets();
    if targets.is_empty() {
        return Err(ConfigError::MissingTarget.into());
    }

    let fetcher = Fetcher::new(&config.crawler)?;

    let mut reports = Vec::with_capacity(targets.len());
    for target in &targets {
        reports.push(run_site_check(&fetcher, target, config).await?);
    }

    Ok(LinkReport::merge(ReportConfig::from(config), reports))
}
