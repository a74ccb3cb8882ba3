//! HTTP fetcher and redirect resolver
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client that never follows redirects on its own
//! - Following redirects by hand so every hop's status is recorded
//! - Detecting redirect loops and enforcing the redirect budget
//! - Enforcing a fresh timeout on every hop
//! - Turning network failures into data instead of errors

use crate::config::CrawlerConfig;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// One hop of a redirect chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectHop {
    /// The URL requested at this hop
    pub url: String,

    /// HTTP status returned for it
    pub status: u16,
}

/// Result of resolving one URL through zero or more redirects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// A 2xx terminal status was reached
    pub ok: bool,

    /// A redirect cycle was detected or the redirect budget ran out
    pub is_loop: bool,

    /// Hops that produced a response, in request order
    pub chain: Vec<RedirectHop>,

    /// The last URL requested (or about to be requested, for loops)
    pub final_url: String,

    /// Terminal HTTP status, 0 if no terminal response was reached
    pub status: u16,

    /// Response text, only for `text/html` terminal responses
    pub body: String,

    /// Content-Type of the terminal response
    pub content_type: String,

    /// Description of a network, timeout or malformed-redirect failure
    pub error: Option<String>,
}

impl FetchOutcome {
    /// Returns true if this outcome should produce a redirect chain record
    ///
    /// Any multi-hop chain qualifies, as does a loop detected on the first hop
    /// (a page redirecting to itself has a chain of length one).
    pub fn has_redirect_chain(&self) -> bool {
        self.chain.len() > 1 || self.is_loop
    }

    fn redirect_loop(chain: Vec<RedirectHop>, final_url: String) -> Self {
        Self {
            is_loop: true,
            chain,
            final_url,
            ..Self::default()
        }
    }

    fn failed(chain: Vec<RedirectHop>, final_url: String, status: u16, error: String) -> Self {
        Self {
            chain,
            final_url,
            status,
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Builds an HTTP client for link checking
///
/// Redirects are disabled at the transport level; [`resolve_with_redirects`]
/// follows them manually so each hop can be recorded and cycles detected.
///
/// # Example
///
/// ```no_run
/// use sitecheck::crawler::build_http_client;
///
/// let client = build_http_client("sitecheck/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one logical fetch of a URL, following redirects by hand
///
/// # Request Flow
///
/// 1. If the current URL was already requested in this resolution → loop
/// 2. GET the current URL with a fresh `timeout`
///    - Network or timeout error → failed outcome (the failing hop is not in `chain`)
/// 3. Record `{url, status}` in the chain
/// 4. 3xx with `Location` → resolve it against the current URL and repeat
///    - 3xx without `Location` → failed outcome (malformed redirect)
/// 5. Anything else is terminal: `ok` for 2xx, body kept only for `text/html`
///
/// At most `max_redirects + 1` requests are made; running out of budget is
/// reported as a loop.
///
/// # Arguments
///
/// * `client` - An HTTP client with redirects disabled
/// * `start_url` - The URL to resolve
/// * `timeout` - Deadline for each individual hop
/// * `max_redirects` - Maximum number of redirects to follow
pub async fn resolve_with_redirects(
    client: &Client,
    start_url: &str,
    timeout: Duration,
    max_redirects: usize,
) -> FetchOutcome {
    let mut chain: Vec<RedirectHop> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = start_url.to_string();

    for _ in 0..=max_redirects {
        if !seen.insert(current.clone()) {
            tracing::debug!("Redirect loop detected at {}", current);
            return FetchOutcome::redirect_loop(chain, current);
        }

        tracing::trace!("GET {}", current);
        let response = match client.get(&current).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = describe_error(&e, timeout);
                tracing::debug!("Request to {} failed: {}", current, error);
                return FetchOutcome::failed(chain, current, 0, error);
            }
        };

        let status = response.status();
        chain.push(RedirectHop {
            url: current.clone(),
            status: status.as_u16(),
        });

        if status.is_redirection() {
            let Some(location) = location_header(response.headers()) else {
                tracing::warn!("Redirect status {} for {} but no Location header", status, current);
                return FetchOutcome::failed(
                    chain,
                    current,
                    status.as_u16(),
                    "redirect without Location header".to_string(),
                );
            };

            match Url::parse(&current).and_then(|base| base.join(&location)) {
                Ok(next) => {
                    tracing::debug!("{} {} -> {}", status.as_u16(), current, next);
                    current = next.to_string();
                    continue;
                }
                Err(e) => {
                    let error = format!("invalid Location header '{}': {}", location, e);
                    return FetchOutcome::failed(chain, current, status.as_u16(), error);
                }
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = if content_type.contains("text/html") {
            match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    let error = describe_error(&e, timeout);
                    return FetchOutcome {
                        content_type,
                        ..FetchOutcome::failed(chain, current, status.as_u16(), error)
                    };
                }
            }
        } else {
            String::new()
        };

        return FetchOutcome {
            ok: status.is_success(),
            is_loop: false,
            chain,
            final_url: current,
            status: status.as_u16(),
            body,
            content_type,
            error: None,
        };
    }

    tracing::debug!(
        "Redirect budget of {} exhausted resolving {}",
        max_redirects,
        start_url
    );
    FetchOutcome::redirect_loop(chain, current)
}

/// Reads the `Location` header, decoding non-ASCII bytes lossily
///
/// Returns None only when the header is absent.
fn location_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LOCATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// Classifies a transport error into a short description
fn describe_error(e: &reqwest::Error, timeout: Duration) -> String {
    if e.is_timeout() {
        format!("request timed out after {}ms", timeout.as_millis())
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// Resolver bound to one HTTP client and the crawler's limits
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    max_redirects: usize,
}

impl Fetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(&config.user_agent)?,
            timeout: Duration::from_millis(config.timeout_ms),
            max_redirects: config.max_redirects,
        })
    }

    /// Resolves a URL with this fetcher's timeout and redirect budget
    pub async fn resolve(&self, url: &str) -> FetchOutcome {
        resolve_with_redirects(&self.client, url, self.timeout, self.max_redirects).await
    }

    /// Returns the per-hop timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
