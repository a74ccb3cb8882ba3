//! Integration tests for the redirect resolver
//!
//! These tests use wiremock to serve redirect chains, loops and slow
//! responses and check the recorded hops of each logical fetch.

use sitecheck::crawler::{build_http_client, resolve_with_redirects, RedirectHop};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn redirect(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("location", location)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_direct_html_response() {
    let server = MockServer::start().await;
    mount(&server, "/page", html("<html><title>Hi</title></html>")).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let url = format!("{}/page", server.uri());
    let outcome = resolve_with_redirects(&client, &url, TIMEOUT, 8).await;

    assert!(outcome.ok);
    assert!(!outcome.is_loop);
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.final_url, url);
    assert_eq!(
        outcome.chain,
        vec![RedirectHop {
            url: url.clone(),
            status: 200
        }]
    );
    assert!(outcome.content_type.contains("text/html"));
    assert!(outcome.body.contains("<title>Hi</title>"));
    assert!(outcome.error.is_none());
    assert!(!outcome.has_redirect_chain());
}

#[tokio::test]
async fn test_non_html_body_not_read() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/logo.png",
        ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
    )
    .await;

    let client = build_http_client("sitecheck-test").unwrap();
    let url = format!("{}/logo.png", server.uri());
    let outcome = resolve_with_redirects(&client, &url, TIMEOUT, 8).await;

    assert!(outcome.ok);
    assert_eq!(outcome.content_type, "image/png");
    assert!(outcome.body.is_empty());
}

#[tokio::test]
async fn test_not_found_is_terminal() {
    let server = MockServer::start().await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let url = format!("{}/missing", server.uri());
    let outcome = resolve_with_redirects(&client, &url, TIMEOUT, 8).await;

    assert!(!outcome.ok);
    assert!(!outcome.is_loop);
    assert_eq!(outcome.status, 404);
    assert_eq!(outcome.chain.len(), 1);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_follows_redirect_chain() {
    let server = MockServer::start().await;
    mount(&server, "/old", redirect(301, "/newer")).await;
    mount(&server, "/newer", redirect(302, "/new")).await;
    mount(&server, "/new", html("<html></html>")).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let base = server.uri();
    let outcome = resolve_with_redirects(&client, &format!("{}/old", base), TIMEOUT, 8).await;

    assert!(outcome.ok);
    assert_eq!(outcome.final_url, format!("{}/new", base));
    let statuses: Vec<u16> = outcome.chain.iter().map(|h| h.status).collect();
    assert_eq!(statuses, vec![301, 302, 200]);
    assert_eq!(outcome.chain[1].url, format!("{}/newer", base));
    assert!(outcome.has_redirect_chain());
}

#[tokio::test]
async fn test_relative_location_resolved_against_current_url() {
    let server = MockServer::start().await;
    mount(&server, "/docs/start", redirect(301, "guide")).await;
    mount(&server, "/docs/guide", html("<html></html>")).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let base = server.uri();
    let outcome =
        resolve_with_redirects(&client, &format!("{}/docs/start", base), TIMEOUT, 8).await;

    assert!(outcome.ok);
    assert_eq!(outcome.final_url, format!("{}/docs/guide", base));
}

#[tokio::test]
async fn test_self_redirect_is_loop() {
    let server = MockServer::start().await;
    mount(&server, "/a", redirect(301, "/a")).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let url = format!("{}/a", server.uri());
    let outcome = resolve_with_redirects(&client, &url, TIMEOUT, 8).await;

    assert!(!outcome.ok);
    assert!(outcome.is_loop);
    assert_eq!(outcome.status, 0);
    assert_eq!(outcome.final_url, url);
    assert_eq!(outcome.chain.len(), 1);
    assert!(outcome.has_redirect_chain());
}

#[tokio::test]
async fn test_two_hop_cycle_is_loop() {
    let server = MockServer::start().await;
    mount(&server, "/a", redirect(302, "/b")).await;
    mount(&server, "/b", redirect(302, "/a")).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let base = server.uri();
    let outcome = resolve_with_redirects(&client, &format!("{}/a", base), TIMEOUT, 8).await;

    assert!(outcome.is_loop);
    assert!(!outcome.ok);
    assert_eq!(outcome.final_url, format!("{}/a", base));
    let urls: Vec<&str> = outcome.chain.iter().map(|h| h.url.as_str()).collect();
    assert_eq!(urls, vec![format!("{}/a", base), format!("{}/b", base)]);
}

#[tokio::test]
async fn test_redirect_budget_exhaustion_is_loop() {
    let server = MockServer::start().await;
    for i in 0..5 {
        mount(&server, &format!("/r{}", i), redirect(301, &format!("/r{}", i + 1))).await;
    }

    let client = build_http_client("sitecheck-test").unwrap();
    let base = server.uri();
    let outcome = resolve_with_redirects(&client, &format!("{}/r0", base), TIMEOUT, 2).await;

    assert!(outcome.is_loop);
    assert!(!outcome.ok);
    assert_eq!(outcome.chain.len(), 3);
    assert_eq!(outcome.final_url, format!("{}/r3", base));
}

#[tokio::test]
async fn test_redirect_without_location_fails() {
    let server = MockServer::start().await;
    mount(&server, "/broken", ResponseTemplate::new(302)).await;

    let client = build_http_client("sitecheck-test").unwrap();
    let url = format!("{}/broken", server.uri());
    let outcome = resolve_with_redirects(&client, &url, TIMEOUT, 8).await;

    assert!(!outcome.ok);
    assert!(!outcome.is_loop);
    assert_eq!(outcome.status, 302);
    assert_eq!(outcome.chain.len(), 1);
    assert_eq!(
        outcome.error.as_deref(),
        Some("redirect without Location header")
    );
}

#[tokio::test]
async fn test_timeout_applies_per_hop() {
    let server = MockServer::start().await;
    mount(&server, "/start", redirect(301, "/slow")).await;
    mount(
        &server,
        "/slow",
        html("<html></html>").set_delay(Duration::from_millis(1500)),
    )
    .await;

    let client = build_http_client("sitecheck-test").unwrap();
    let base = server.uri();
    let outcome = resolve_with_redirects(
        &client,
        &format!("{}/start", base),
        Duration::from_millis(200),
        8,
    )
    .await;

    assert!(!outcome.ok);
    assert!(!outcome.is_loop);
    assert_eq!(outcome.status, 0);
    // The failing hop is not part of the chain; final_url names it
    assert_eq!(outcome.chain.len(), 1);
    assert_eq!(outcome.final_url, format!("{}/slow", base));
    assert!(outcome.error.unwrap().contains("timed out"));
}
