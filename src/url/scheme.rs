use url::Url;

/// Raw attribute prefixes that are never resolved or fetched
const IGNORED_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:", "data:"];

/// Checks whether a raw reference value should be skipped before resolution
///
/// True for empty or whitespace-only values, same-page fragments and the
/// `mailto:`, `tel:`, `javascript:` and `data:` schemes (case-insensitive).
pub fn is_ignorable_scheme(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    value.is_empty() || IGNORED_PREFIXES.iter().any(|p| value.starts_with(p))
}

/// Returns true only for `http` and `https` URLs
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
