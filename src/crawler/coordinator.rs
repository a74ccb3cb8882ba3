//! Crawler coordinator - per-target crawl orchestration
//!
//! This module contains the crawl loop for one target:
//! - Draining the frontier breadth-first within the page budget
//! - Fetching each distinct URL exactly once through the redirect resolver
//! - Parsing HTML pages for references and metadata
//! - Classifying failed references into broken links and missing assets
//! - Recording redirect chains and SEO gaps
//!
//! Exactly one request is in flight at a time, so traversal order and issue
//! order are deterministic for identical remote content.

use crate::config::Config;
use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::parser::{extract_metadata, extract_references, Reference};
use crate::report::{BrokenLink, MissingAsset, RedirectChainRecord, SeoIssue, SiteReport};
use crate::state::{CrawlPhase, CrawlState};
use crate::url::{
    classify_asset, is_ignored_domain, is_internal, likely_html, normalize, normalize_url,
    resolve_reference,
};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Crawls one target and accumulates its report
pub struct Coordinator {
    fetcher: Fetcher,
    root: Url,
    ignore_domains: Vec<String>,
    state: CrawlState,
    report: SiteReport,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator for one target
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Resolver carrying the HTTP client, timeout and redirect budget
    /// * `target` - The site root to crawl
    /// * `config` - Supplies the page budget and ignored domains
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SiteCheckError)` - The target is not an absolute HTTP(S) URL
    pub fn new(fetcher: Fetcher, target: &str, config: &Config) -> Result<Self> {
        let root = normalize_url(target)?;
        let state = CrawlState::new(root.to_string(), config.crawler.max_pages);

        Ok(Self {
            fetcher,
            root,
            ignore_domains: config.ignore_domains.clone(),
            state,
            report: SiteReport::new(target),
            phase: CrawlPhase::Idle,
        })
    }

    /// Returns the coordinator's current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl loop until the frontier empties or the page budget is spent
    ///
    /// Per-URL failures are recorded in the report; the only error is calling
    /// `run` a second time.
    pub async fn run(&mut self) -> Result<SiteReport> {
        self.phase.advance(CrawlPhase::Crawling)?;
        tracing::info!("Crawling {}", self.report.target);

        let start_time = Instant::now();

        while let Some(page_url) = self.state.next_page() {
            tracing::debug!("Processing page: {}", page_url);
            self.crawl_page(&page_url).await;

            let pages_crawled = self.state.visited_count();
            if pages_crawled % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} URLs checked",
                    pages_crawled,
                    self.state.frontier_len(),
                    self.state.checked_count()
                );
            }
        }

        self.phase.advance(CrawlPhase::Done)?;

        let mut report = std::mem::take(&mut self.report);
        report.crawled_pages = self.state.crawled_pages().to_vec();
        report.checked_url_count = self.state.checked_count();

        tracing::info!(
            "Finished {}: {} pages, {} URLs checked in {:?}",
            report.target,
            report.crawled_pages.len(),
            report.checked_url_count,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Fetches one frontier page, audits its metadata and checks its references
    async fn crawl_page(&mut self, page_url: &str) {
        let outcome = self.fetch_once(page_url).await;

        if outcome.has_redirect_chain() {
            self.report
                .redirect_chains
                .push(RedirectChainRecord::for_page(page_url, &outcome));
        }

        if !outcome.ok {
            tracing::warn!(
                "Page {} failed (status {}): {}",
                page_url,
                outcome.status,
                outcome.error.as_deref().unwrap_or("page fetch failed")
            );
            self.report
                .broken_internal
                .push(BrokenLink::for_crawl_failure(page_url, &outcome));
            return;
        }

        let page_base = match Url::parse(page_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping references of unparseable page {}: {}", page_url, e);
                return;
            }
        };

        let missing_fields = extract_metadata(&outcome.body).missing_fields();
        if !missing_fields.is_empty() {
            self.report.seo_issues.push(SeoIssue {
                page: page_url.to_string(),
                missing_fields,
            });
        }

        for reference in extract_references(&outcome.body) {
            self.check_reference(page_url, &page_base, &reference).await;
        }
    }

    /// Checks one reference found on a page and queues it if it is a crawlable page
    async fn check_reference(&mut self, page_url: &str, page_base: &Url, reference: &Reference) {
        let Some(resolved) = resolve_reference(&reference.raw, page_base) else {
            return;
        };

        if is_ignored_domain(&resolved, &self.ignore_domains) {
            tracing::trace!("Ignoring {} (ignored domain)", resolved);
            return;
        }

        let normalized = normalize(&resolved).to_string();
        let outcome = self.fetch_once(&normalized).await;
        let internal = is_internal(&resolved, &self.root);

        if outcome.has_redirect_chain() {
            self.report.redirect_chains.push(RedirectChainRecord::for_reference(
                page_url,
                reference.kind,
                &normalized,
                &outcome,
            ));
        }

        if !outcome.ok {
            let link = BrokenLink::for_reference(page_url, &normalized, reference.kind, &outcome);
            match (internal, reference.kind.is_anchor()) {
                (true, true) => self.report.broken_internal.push(link),
                (true, false) => self.report.missing_assets.push(MissingAsset {
                    link,
                    asset_kind: classify_asset(resolved.path()),
                }),
                (false, _) => self.report.broken_external.push(link),
            }
            return;
        }

        if internal
            && reference.kind.is_anchor()
            && likely_html(&resolved)
            && self.state.enqueue(normalized.clone())
        {
            tracing::trace!("Queued {}", normalized);
        }
    }

    /// Returns the memoized outcome for a normalized URL, fetching it on first use
    async fn fetch_once(&mut self, url: &str) -> Arc<FetchOutcome> {
        if let Some(outcome) = self.state.checked(url) {
            return outcome;
        }

        let outcome = self.fetcher.resolve(url).await;
        tracing::debug!(
            "Checked {} -> status {} ({} hops)",
            url,
            outcome.status,
            outcome.chain.len()
        );
        self.state.record_checked(url.to_string(), outcome)
    }
}

/// Crawls a single target with a fresh, unshared crawl state
///
/// # Arguments
///
/// * `fetcher` - The resolver to use
/// * `target` - The site root to crawl
/// * `config` - The run configuration
///
/// # Example
///
/// ```no_run
/// use sitecheck::config::Config;
/// use sitecheck::crawler::{run_site_check, Fetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = Fetcher::new(&config.crawler)?;
/// let report = run_site_check(&fetcher, "https://example.com/", &config).await?;
/// println!("{} pages crawled", report.crawled_pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_site_check(
    fetcher: &Fetcher,
    target: &str,
    config: &Config,
) -> Result<SiteReport> {
    let mut coordinator = Coordinator::new(fetcher.clone(), target, config)?;
    coordinator.run().await
}
