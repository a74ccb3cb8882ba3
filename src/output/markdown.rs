//! Markdown report generation
//!
//! This module renders the human-readable `report.md`, ordered by priority:
//! summary counts, broken internal links, broken external links, redirect
//! chains, missing assets, recommended fixes, then SEO/meta issues.

use crate::output::traits::{OutputResult, ReportWriter};
use crate::report::{BrokenLink, FailureReport, LinkReport};

/// Writes `report.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownWriter;

impl ReportWriter for MarkdownWriter {
    fn file_name(&self) -> &'static str {
        "report.md"
    }

    fn render(&self, report: &LinkReport) -> OutputResult<String> {
        Ok(format_markdown_report(report))
    }

    fn render_failure(&self, failure: &FailureReport) -> OutputResult<String> {
        Ok(format!(
            "# Link Check Report\n\nRun failed: {}\n",
            failure.error
        ))
    }
}

/// Formats a link report as markdown
pub fn format_markdown_report(report: &LinkReport) -> String {
    let mut md = String::new();
    let summary = &report.summary;

    md.push_str("# Link Check Report\n\n");
    md.push_str(&format!("Generated: {}\n\n", report.generated_at.to_rfc3339()));

    md.push_str("## 1) Summary counts\n\n");
    md.push_str(&format!("- Targets scanned: {}\n", report.targets.len()));
    md.push_str(&format!("- Pages crawled: {}\n", summary.pages_crawled));
    md.push_str(&format!("- URLs checked: {}\n", summary.urls_checked));
    md.push_str(&format!("- Broken internal links: {}\n", summary.broken_internal));
    md.push_str(&format!("- Broken external links: {}\n", summary.broken_external));
    md.push_str(&format!("- Redirect chains/loops: {}\n", summary.redirect_chains));
    md.push_str(&format!("- Missing assets: {}\n", summary.missing_assets));
    md.push_str(&format!("- SEO/meta issues: {}\n\n", summary.seo_issues));

    md.push_str("## 2) Broken internal links (highest priority)\n\n");
    push_links(&mut md, &report.broken_internal);

    md.push_str("## 3) Broken external links\n\n");
    push_links(&mut md, &report.broken_external);

    md.push_str("## 4) Redirect chains\n\n");
    if report.redirect_chains.is_empty() {
        md.push_str("- None\n");
    }
    for record in &report.redirect_chains {
        let chain = record
            .chain
            .iter()
            .map(|hop| format!("{}:{}", hop.status, hop.url))
            .collect::<Vec<_>>()
            .join(" -> ");
        let loop_label = if record.is_loop { " [LOOP]" } else { "" };
        md.push_str(&format!("- {} -> {}{}\n", chain, record.final_url, loop_label));
    }
    md.push('\n');

    md.push_str("## 5) Missing assets\n\n");
    if report.missing_assets.is_empty() {
        md.push_str("- None\n");
    }
    for asset in &report.missing_assets {
        md.push_str(&format!(
            "- [{}] {} (status: {}) from {}\n",
            asset.asset_kind,
            asset.link.url,
            status_label(asset.link.status),
            asset.link.source
        ));
    }
    md.push('\n');

    md.push_str("## 6) Recommended fixes\n\n");
    md.push_str("- For internal link/asset failures, update the source URLs in the pages listed above.\n");
    md.push_str("- For missing SEO tags, add `<title>`, `<meta name=\"description\">` and Open Graph tags to the page templates.\n");
    md.push_str("- If redirects are unintentional, replace redirected URLs with their final canonical URLs.\n");

    if !report.seo_issues.is_empty() {
        md.push_str("\n### SEO/meta issues\n");
        for issue in &report.seo_issues {
            md.push_str(&format!(
                "- {}: missing {}\n",
                issue.page,
                issue.missing_fields.join(", ")
            ));
        }
    }

    md
}

fn push_links(md: &mut String, links: &[BrokenLink]) {
    if links.is_empty() {
        md.push_str("- None\n");
    }
    for link in links {
        md.push_str(&format!(
            "- {} (status: {}) from {}\n",
            link.url,
            status_label(link.status),
            link.source
        ));
    }
    md.push('\n');
}

/// Renders status 0 (no response) as `n/a`
fn status_label(status: u16) -> String {
    if status == 0 {
        "n/a".to_string()
    } else {
        status.to_string()
    }
}
