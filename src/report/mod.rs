//! Report model for crawl results
//!
//! One `SiteReport` is built per target; `LinkReport::merge` concatenates them
//! and recomputes the summary counts over the union.

mod issues;

pub use issues::{BrokenLink, MissingAsset, RedirectChainRecord, SeoIssue, CRAWL_SOURCE};

use crate::config::Config;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Crawl result for one target
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    /// The configured site root
    pub target: String,

    /// Pages dequeued from the frontier, in crawl order
    pub crawled_pages: Vec<String>,

    /// Distinct URLs fetched for this target
    pub checked_url_count: usize,

    pub broken_internal: Vec<BrokenLink>,
    pub broken_external: Vec<BrokenLink>,
    pub redirect_chains: Vec<RedirectChainRecord>,
    pub missing_assets: Vec<MissingAsset>,
    pub seo_issues: Vec<SeoIssue>,
}

impl SiteReport {
    /// Creates an empty report for a target
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..Self::default()
        }
    }
}

/// Summary counts over every target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub pages_crawled: usize,
    pub urls_checked: usize,
    pub broken_internal: usize,
    pub broken_external: usize,
    pub redirect_chains: usize,
    pub missing_assets: usize,
    pub seo_issues: usize,
}

/// The effective configuration, echoed into the report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub base_url: String,
    pub staging_url: Option<String>,
    pub ignore_domains: Vec<String>,
    pub fail_on_external: bool,
    pub timeout_ms: u64,
    pub max_pages: usize,
    pub targets: Vec<String>,
}

impl From<&Config> for ReportConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.targets.base_url.clone(),
            staging_url: config.targets.staging_url.clone(),
            ignore_domains: config.ignore_domains.clone(),
            fail_on_external: config.fail_on_external,
            timeout_ms: config.crawler.timeout_ms,
            max_pages: config.crawler.max_pages,
            targets: config.targets(),
        }
    }
}

/// Merged report over every configured target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub generated_at: DateTime<Utc>,
    pub config: ReportConfig,
    pub targets: Vec<SiteReport>,
    pub broken_internal: Vec<BrokenLink>,
    pub broken_external: Vec<BrokenLink>,
    pub redirect_chains: Vec<RedirectChainRecord>,
    pub missing_assets: Vec<MissingAsset>,
    pub seo_issues: Vec<SeoIssue>,
    pub summary: Summary,
}

impl LinkReport {
    /// Concatenates per-target reports and recomputes the summary
    pub fn merge(config: ReportConfig, targets: Vec<SiteReport>) -> Self {
        let broken_internal = concat(&targets, |t| &t.broken_internal);
        let broken_external = concat(&targets, |t| &t.broken_external);
        let redirect_chains = concat(&targets, |t| &t.redirect_chains);
        let missing_assets = concat(&targets, |t| &t.missing_assets);
        let seo_issues = concat(&targets, |t| &t.seo_issues);

        let summary = Summary {
            pages_crawled: targets.iter().map(|t| t.crawled_pages.len()).sum(),
            urls_checked: targets.iter().map(|t| t.checked_url_count).sum(),
            broken_internal: broken_internal.len(),
            broken_external: broken_external.len(),
            redirect_chains: redirect_chains.len(),
            missing_assets: missing_assets.len(),
            seo_issues: seo_issues.len(),
        };

        Self {
            generated_at: Utc::now(),
            config,
            targets,
            broken_internal,
            broken_external,
            redirect_chains,
            missing_assets,
            seo_issues,
            summary,
        }
    }

    /// Returns true if any recorded redirect chain is a loop
    pub fn has_redirect_loops(&self) -> bool {
        self.redirect_chains.iter().any(|c| c.is_loop)
    }

    /// Broken internal links plus missing assets, plus one if any redirect loops
    pub fn critical_issue_count(&self) -> usize {
        self.summary.broken_internal
            + self.summary.missing_assets
            + usize::from(self.has_redirect_loops())
    }

    /// Returns true if broken external links fail the run under `fail_on_external`
    pub fn external_failure(&self, fail_on_external: bool) -> bool {
        fail_on_external && self.summary.broken_external > 0
    }

    /// Decides whether the run should exit non-zero
    pub fn is_failure(&self, fail_on_external: bool) -> bool {
        self.critical_issue_count() > 0 || self.external_failure(fail_on_external)
    }
}

/// Concatenates one issue list across every target, preserving target order
fn concat<T: Clone>(targets: &[SiteReport], field: impl Fn(&SiteReport) -> &Vec<T>) -> Vec<T> {
    targets.iter().flat_map(|t| field(t).iter().cloned()).collect()
}

/// Minimal report written when the run could not start or complete
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub generated_at: DateTime<Utc>,
    pub error: String,
}

impl FailureReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            error: error.into(),
        }
    }
}
