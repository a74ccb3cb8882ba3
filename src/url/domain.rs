use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitecheck::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the crawl target
///
/// Internal means scheme, host and port all match the root's origin exactly;
/// `http` and `https` variants of the same host are different origins.
pub fn is_internal(url: &Url, root: &Url) -> bool {
    url.origin() == root.origin()
}

/// Checks a URL's host against the configured ignore list
///
/// Each entry is a lowercase substring; a host containing any non-empty entry
/// is ignored. Hosts are compared case-insensitively.
pub fn is_ignored_domain(url: &Url, ignore_domains: &[String]) -> bool {
    let Some(host) = extract_domain(url) else {
        return false;
    };

    ignore_domains
        .iter()
        .filter(|d| !d.is_empty())
        .any(|d| host.contains(d.as_str()))
}
