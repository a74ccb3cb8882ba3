//! Issue records produced while crawling a target
//!
//! All records are append-only and serialize with the camelCase keys used in
//! `report.json`.

use crate::crawler::{FetchOutcome, RedirectHop, ReferenceKind};
use crate::url::AssetKind;
use serde::Serialize;

/// Source label for pages that failed when fetched from the frontier
pub const CRAWL_SOURCE: &str = "(crawl)";

/// A link that did not resolve to a 2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    /// Page the reference was found on, or `(crawl)` for a failed page fetch
    pub source: String,

    /// Normalized URL that failed
    pub url: String,

    /// Terminal status, 0 when none was reached
    pub status: u16,

    pub error: String,

    /// Kind of reference; absent for failed page fetches
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReferenceKind>,
}

impl BrokenLink {
    /// Builds a record for a reference found on `source`
    pub fn for_reference(
        source: &str,
        url: &str,
        kind: ReferenceKind,
        outcome: &FetchOutcome,
    ) -> Self {
        Self {
            source: source.to_string(),
            url: url.to_string(),
            status: outcome.status,
            error: outcome
                .error
                .clone()
                .unwrap_or_else(|| "request failed".to_string()),
            kind: Some(kind),
        }
    }

    /// Builds a record for a frontier page that could not be fetched
    pub fn for_crawl_failure(page_url: &str, outcome: &FetchOutcome) -> Self {
        Self {
            source: CRAWL_SOURCE.to_string(),
            url: page_url.to_string(),
            status: outcome.status,
            error: outcome
                .error
                .clone()
                .unwrap_or_else(|| "page fetch failed".to_string()),
            kind: None,
        }
    }
}

/// An internal non-anchor reference that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingAsset {
    #[serde(flatten)]
    pub link: BrokenLink,

    /// Asset family derived from the resolved path
    pub asset_kind: AssetKind,
}

/// A fetch that went through redirects (or looped)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectChainRecord {
    /// The page being crawled, or the page the reference was found on
    pub source: String,

    /// Reference kind; absent for page-level redirects
    #[serde(rename = "linkType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReferenceKind>,

    /// Normalized reference URL; absent for page-level redirects
    #[serde(rename = "original", skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,

    pub chain: Vec<RedirectHop>,

    pub final_url: String,

    pub is_loop: bool,
}

impl RedirectChainRecord {
    /// Records the redirects taken while fetching a frontier page
    pub fn for_page(page_url: &str, outcome: &FetchOutcome) -> Self {
        Self {
            source: page_url.to_string(),
            kind: None,
            original_url: None,
            chain: outcome.chain.clone(),
            final_url: outcome.final_url.clone(),
            is_loop: outcome.is_loop,
        }
    }

    /// Records the redirects taken by a reference found on `source`
    pub fn for_reference(
        source: &str,
        kind: ReferenceKind,
        original_url: &str,
        outcome: &FetchOutcome,
    ) -> Self {
        Self {
            source: source.to_string(),
            kind: Some(kind),
            original_url: Some(original_url.to_string()),
            chain: outcome.chain.clone(),
            final_url: outcome.final_url.clone(),
            is_loop: outcome.is_loop,
        }
    }
}

/// A page missing one or more discoverability fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoIssue {
    pub page: String,

    #[serde(rename = "missing")]
    pub missing_fields: Vec<String>,
}
