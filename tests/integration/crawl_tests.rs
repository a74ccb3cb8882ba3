//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitecheck::config::Config;
use sitecheck::crawler::{run_site_check, Fetcher, ReferenceKind};
use sitecheck::report::CRAWL_SOURCE;
use sitecheck::{run_link_check, AssetKind, ConfigError, SiteCheckError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Head markup that satisfies every metadata check
const FULL_HEAD: &str = r#"<title>Page</title>
<meta name="description" content="A page">
<meta property="og:title" content="Page">
<meta property="og:description" content="A page">
<meta property="og:image" content="https://cdn.invalid/og.png">"#;

/// Creates a test configuration crawling the given root
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.targets.base_url = base_url.to_string();
    config.crawler.timeout_ms = 5000;
    config
}

fn page(body: &str) -> ResponseTemplate {
    let html = format!(
        "<html><head>{}</head><body>{}</body></html>",
        FULL_HEAD, body
    );
    ResponseTemplate::new(200).set_body_raw(html.into_bytes(), "text/html")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn crawl(config: &Config) -> sitecheck::SiteReport {
    let fetcher = Fetcher::new(&config.crawler).unwrap();
    run_site_check(&fetcher, &config.targets.base_url, config)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_crawls_linked_pages_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/a", page(r#"<a href="/b">b</a>"#)).await;
    mount(&server, "/b", page(r#"<a href="c">c</a>"#)).await;
    mount(&server, "/c", page("done")).await;

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert_eq!(
        report.crawled_pages,
        vec![
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base)
        ]
    );
    assert!(report.broken_internal.is_empty());
    assert!(report.broken_external.is_empty());
    assert!(report.missing_assets.is_empty());
    assert!(report.redirect_chains.is_empty());
    assert!(report.seo_issues.is_empty());
    assert_eq!(report.checked_url_count, 3);
}

#[tokio::test]
async fn test_broken_internal_link_not_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/a", page(r#"<a href="/missing">gone</a>"#)).await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert_eq!(report.broken_internal.len(), 1);
    let broken = &report.broken_internal[0];
    assert_eq!(broken.url, format!("{}/missing", base));
    assert_eq!(broken.source, format!("{}/a", base));
    assert_eq!(broken.status, 404);
    assert_eq!(broken.kind, Some(ReferenceKind::Anchor));
    assert_eq!(report.crawled_pages, vec![format!("{}/a", base)]);
}

#[tokio::test]
async fn test_missing_image_is_asset_not_link() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/a", page(r#"<img src="/logo.png">"#)).await;
    mount(&server, "/logo.png", ResponseTemplate::new(404)).await;

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert!(report.broken_internal.is_empty());
    assert_eq!(report.missing_assets.len(), 1);
    let asset = &report.missing_assets[0];
    assert_eq!(asset.asset_kind, AssetKind::Image);
    assert_eq!(asset.link.status, 404);
    assert_eq!(asset.link.kind, Some(ReferenceKind::Image));
}

#[tokio::test]
async fn test_self_redirecting_root_is_loop_and_crawl_failure() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/a"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert_eq!(report.redirect_chains.len(), 1);
    let record = &report.redirect_chains[0];
    assert!(record.is_loop);
    assert_eq!(record.kind, None);
    assert_eq!(record.final_url, format!("{}/a", base));

    assert_eq!(report.broken_internal.len(), 1);
    assert_eq!(report.broken_internal[0].source, CRAWL_SOURCE);
    assert_eq!(report.broken_internal[0].url, format!("{}/a", base));
    assert!(report.seo_issues.is_empty());
}

#[tokio::test]
async fn test_ignored_domain_never_fetched() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;
    let port = url::Url::parse(&external.uri())
        .unwrap()
        .port()
        .unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(0)
        .mount(&external)
        .await;

    let link = format!(r#"<a href="http://localhost:{}/x">x</a>"#, port);
    mount(&server, "/a", page(&link)).await;

    let mut config = create_test_config(&format!("{}/a", server.uri()));
    config.ignore_domains = vec!["localhost".to_string()];
    let report = crawl(&config).await;

    assert!(report.broken_external.is_empty());
    assert!(report.broken_internal.is_empty());
    assert!(report.redirect_chains.is_empty());
    assert_eq!(report.checked_url_count, 1);
}

#[tokio::test]
async fn test_seo_issue_lists_missing_fields() {
    let server = MockServer::start().await;
    let base = server.uri();
    let html = r#"<html><head>
        <meta name="description" content="About us">
        <meta property="og:title" content="About">
        <meta property="og:description" content="About us">
        </head><body></body></html>"#;
    mount(
        &server,
        "/a",
        ResponseTemplate::new(200).set_body_raw(html.as_bytes().to_vec(), "text/html"),
    )
    .await;

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert_eq!(report.seo_issues.len(), 1);
    assert_eq!(report.seo_issues[0].page, format!("{}/a", base));
    assert_eq!(
        report.seo_issues[0].missing_fields,
        vec!["title".to_string(), "og:image".to_string()]
    );
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    let a_body = r##"<a href="/b#intro">b</a> <a href="/b#more">b again</a>
        <a href="#top">top</a> <img src="/shared.png">
        <a href="mailto:hi@example.com">mail</a> <a href="tel:123">call</a>
        <a href="javascript:void(0)">js</a>"##;
    let b_body = r#"<a href="/a">home</a> <img src="/shared.png">"#;

    for (route, response) in [
        ("/a", page(a_body)),
        ("/b", page(b_body)),
        ("/shared.png", ResponseTemplate::new(200)),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = create_test_config(&format!("{}/a", base));
    let report = crawl(&config).await;

    assert_eq!(
        report.crawled_pages,
        vec![format!("{}/a", base), format!("{}/b", base)]
    );
    assert_eq!(report.checked_url_count, 3);
    assert!(report.broken_internal.is_empty());
}

#[tokio::test]
async fn test_page_budget_limits_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(
        &server,
        "/",
        page(r#"<a href="/p1">1</a><a href="/p2">2</a><a href="/p3">3</a>"#),
    )
    .await;
    for route in ["/p1", "/p2", "/p3"] {
        mount(&server, route, page("leaf")).await;
    }

    let mut config = create_test_config(&format!("{}/", base));
    config.crawler.max_pages = 2;
    let report = crawl(&config).await;

    assert_eq!(
        report.crawled_pages,
        vec![format!("{}/", base), format!("{}/p1", base)]
    );
    assert_eq!(report.checked_url_count, 4);
}

#[tokio::test]
async fn test_non_html_links_not_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/", page(r#"<a href="/files/cv.pdf">cv</a>"#)).await;
    mount(
        &server,
        "/files/cv.pdf",
        ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"),
    )
    .await;

    let config = create_test_config(&format!("{}/", base));
    let report = crawl(&config).await;

    assert_eq!(report.crawled_pages, vec![format!("{}/", base)]);
    assert_eq!(report.checked_url_count, 2);
}

#[tokio::test]
async fn test_redirected_reference_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount(&server, "/", page(r#"<link rel="stylesheet" href="/old.css">"#)).await;
    mount(
        &server,
        "/old.css",
        ResponseTemplate::new(301).insert_header("location", "/new.css"),
    )
    .await;
    mount(&server, "/new.css", ResponseTemplate::new(200)).await;

    let config = create_test_config(&format!("{}/", base));
    let report = crawl(&config).await;

    assert_eq!(report.redirect_chains.len(), 1);
    let record = &report.redirect_chains[0];
    assert!(!record.is_loop);
    assert_eq!(record.kind, Some(ReferenceKind::StylesheetLink));
    assert_eq!(record.original_url, Some(format!("{}/old.css", base)));
    assert_eq!(record.final_url, format!("{}/new.css", base));
    assert_eq!(record.chain.len(), 2);
    assert!(report.missing_assets.is_empty());
}

#[tokio::test]
async fn test_each_failure_lands_in_one_list() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;
    let base = server.uri();
    mount(&external, "/x.png", ResponseTemplate::new(404)).await;

    let body = format!(
        r#"<a href="/gone">gone</a> <img src="/hero.jpg"> <img src="{}/x.png">"#,
        external.uri()
    );
    mount(&server, "/", page(&body)).await;
    mount(&server, "/gone", ResponseTemplate::new(404)).await;
    mount(&server, "/hero.jpg", ResponseTemplate::new(404)).await;

    let config = create_test_config(&format!("{}/", base));
    let report = crawl(&config).await;

    assert_eq!(report.broken_internal.len(), 1);
    assert_eq!(report.missing_assets.len(), 1);
    assert_eq!(report.broken_external.len(), 1);

    assert_eq!(report.broken_internal[0].url, format!("{}/gone", base));
    assert_eq!(report.missing_assets[0].link.url, format!("{}/hero.jpg", base));
    assert_eq!(report.missing_assets[0].asset_kind, AssetKind::Image);

    // External references are external whatever their kind
    let external_image = &report.broken_external[0];
    assert_eq!(external_image.url, format!("{}/x.png", external.uri()));
    assert_eq!(external_image.kind, Some(ReferenceKind::Image));
    assert_eq!(external_image.status, 404);

    let mut urls: Vec<&str> = report
        .broken_internal
        .iter()
        .chain(report.broken_external.iter())
        .map(|l| l.url.as_str())
        .chain(report.missing_assets.iter().map(|a| a.link.url.as_str()))
        .collect();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), 3);
}

#[tokio::test]
async fn test_broken_external_only_fails_when_enabled() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;
    mount(&external, "/down", ResponseTemplate::new(503)).await;

    let link = format!(r#"<a href="{}/down">partner</a>"#, external.uri());
    mount(&server, "/", page(&link)).await;

    let config = create_test_config(&format!("{}/", server.uri()));
    let report = run_link_check(&config).await.unwrap();

    assert_eq!(report.summary.broken_external, 1);
    assert_eq!(report.broken_external[0].status, 503);
    assert_eq!(report.critical_issue_count(), 0);
    assert!(!report.is_failure(false));
    assert!(report.is_failure(true));
}

#[tokio::test]
async fn test_base_and_staging_merged() {
    let production = MockServer::start().await;
    let staging = MockServer::start().await;
    mount(&production, "/", page(r#"<a href="/about">about</a>"#)).await;
    mount(&production, "/about", page("about")).await;
    mount(&staging, "/", page(r#"<img src="/hero.webp">"#)).await;
    mount(&staging, "/hero.webp", ResponseTemplate::new(404)).await;

    let mut config = create_test_config(&format!("{}/", production.uri()));
    config.targets.staging_url = Some(format!("{}/", staging.uri()));
    let report = run_link_check(&config).await.unwrap();

    assert_eq!(report.targets.len(), 2);
    assert_eq!(report.targets[0].target, format!("{}/", production.uri()));
    assert_eq!(report.summary.pages_crawled, 3);
    assert_eq!(report.summary.urls_checked, 4);
    assert_eq!(report.summary.missing_assets, 1);
    assert_eq!(report.missing_assets[0].asset_kind, AssetKind::Image);
    assert_eq!(report.critical_issue_count(), 1);
    assert!(report.is_failure(false));
}

#[tokio::test]
async fn test_missing_target_is_error() {
    let config = Config::default();
    let result = run_link_check(&config).await;
    assert!(matches!(
        result,
        Err(SiteCheckError::Config(ConfigError::MissingTarget))
    ));
}
