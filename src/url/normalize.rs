use crate::url::is_http;
use crate::UrlError;
use url::Url;

/// Normalizes a parsed URL into its identity key by clearing the fragment
///
/// Everything else (scheme, host, path, query) is left exactly as the URL parser
/// serialized it, so two URLs that differ only by fragment normalize identically.
pub fn normalize(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}

/// Parses and normalizes a URL string
///
/// # Arguments
///
/// * `url_str` - An absolute URL
///
/// # Returns
///
/// * `Ok(Url)` - The URL with its fragment removed
/// * `Err(UrlError)` - The string is not an absolute HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use sitecheck::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }
    if !is_http(&url) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    Ok(normalize(&url))
}
