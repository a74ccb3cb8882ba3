//! URL handling module for sitecheck
//!
//! This module provides URL normalization, scheme filtering, origin membership,
//! ignored-domain matching and asset classification.

mod classify;
mod domain;
mod normalize;
mod scheme;

use url::Url;

// Re-export main functions
pub use classify::{classify_asset, likely_html, AssetKind};
pub use domain::{extract_domain, is_ignored_domain, is_internal};
pub use normalize::{normalize, normalize_url};
pub use scheme::{is_http, is_ignorable_scheme};

/// Resolves a raw attribute value found on a page into an absolute HTTP(S) URL
///
/// Returns None when the reference should be skipped without recording an issue:
/// - ignorable values (empty, `#...`, `mailto:`, `tel:`, `javascript:`, `data:`)
/// - values that cannot be resolved against `base`
/// - URLs with a scheme other than `http`/`https`
///
/// The returned URL still carries its fragment; callers normalize it for use as a key
/// but keep the resolved form for host and path inspection.
///
/// # Examples
///
/// ```
/// use sitecheck::url::resolve_reference;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let resolved = resolve_reference("guide#intro", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/docs/guide#intro");
///
/// assert!(resolve_reference("mailto:someone@example.com", &base).is_none());
/// assert!(resolve_reference("ftp://example.com/file", &base).is_none());
/// ```
pub fn resolve_reference(raw: &str, base: &Url) -> Option<Url> {
    if is_ignorable_scheme(raw) {
        return None;
    }

    let resolved = base.join(raw).ok()?;
    if !is_http(&resolved) {
        return None;
    }

    Some(resolved)
}
