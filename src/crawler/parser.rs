//! HTML parser for extracting references and metadata
//!
//! This module handles parsing statically served HTML to extract:
//! - Outbound references (links, images, scripts, stylesheets, media, srcset candidates)
//! - Discoverability metadata (title, description, Open Graph tags)
//!
//! Raw attribute values are returned unresolved; resolution, filtering and
//! deduplication happen in the coordinator.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every element/attribute pair that can carry a reference
///
/// `noscript` contents arrive as raw text and are re-parsed as a fragment.
const REFERENCE_SELECTOR: &str = "a[href], img[src], script[src], link[href], video[src], \
     audio[src], source[src], [srcset], noscript";

/// The element a reference was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// `<a href>`
    #[serde(rename = "a")]
    Anchor,
    /// `<img src>`
    #[serde(rename = "img")]
    Image,
    /// `<script src>`
    #[serde(rename = "script")]
    Script,
    /// `<link href>` (stylesheets, icons, manifests, canonical links)
    #[serde(rename = "link")]
    StylesheetLink,
    /// `<video src>`
    #[serde(rename = "video")]
    Video,
    /// `<audio src>`
    #[serde(rename = "audio")]
    Audio,
    /// `<source src>`
    #[serde(rename = "source")]
    Source,
    /// One candidate URL of a `srcset` attribute
    #[serde(rename = "srcset")]
    ResponsiveImageSet,
}

impl ReferenceKind {
    /// Anchors are links; every other kind is an asset
    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::Anchor)
    }

    /// Returns the short label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anchor => "a",
            Self::Image => "img",
            Self::Script => "script",
            Self::StylesheetLink => "link",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Source => "source",
            Self::ResponsiveImageSet => "srcset",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound pointer discovered in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,

    /// The attribute text as written, not yet resolved
    pub raw: String,
}

/// Discoverability metadata of a page; absent values are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
}

impl PageMetadata {
    /// Lists the labels of missing fields, in a fixed order
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("title", &self.title),
            ("meta description", &self.description),
            ("og:title", &self.og_title),
            ("og:description", &self.og_description),
            ("og:image", &self.og_image),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label.to_string())
        .collect()
    }
}

/// Extracts every outbound reference from an HTML document
///
/// # Extraction Rules
///
/// - `<a href>`, `<img src>`, `<script src>`, `<link href>`
/// - `<video src>`, `<audio src>`, `<source src>`
/// - every `srcset` candidate's URL (descriptors like `2x` or `480w` dropped)
///
/// References come back in document order; an element's own `src`/`href` comes
/// before its `srcset` candidates. Duplicates are preserved.
///
/// # Example
///
/// ```
/// use sitecheck::crawler::{extract_references, ReferenceKind};
///
/// let html = r#"<a href="/about">About</a><img src="/a.png" srcset="/a@2x.png 2x">"#;
/// let refs = extract_references(html);
/// assert_eq!(refs.len(), 3);
/// assert_eq!(refs[0].kind, ReferenceKind::Anchor);
/// assert_eq!(refs[2].raw, "/a@2x.png");
/// ```
pub fn extract_references(html: &str) -> Vec<Reference> {
    let mut references = Vec::new();

    let Ok(selector) = Selector::parse(REFERENCE_SELECTOR) else {
        return references;
    };

    collect_references(&Html::parse_document(html), &selector, &mut references);
    references
}

fn collect_references(document: &Html, selector: &Selector, references: &mut Vec<Reference>) {
    for element in document.select(selector) {
        // Parsed with scripting on, so fallback markup is a single text node
        if element.value().name() == "noscript" {
            let markup: String = element.text().collect();
            if !markup.trim().is_empty() {
                collect_references(&Html::parse_fragment(&markup), selector, references);
            }
            continue;
        }

        if let Some((kind, raw)) = primary_reference(&element) {
            references.push(Reference {
                kind,
                raw: raw.to_string(),
            });
        }

        if let Some(srcset) = element.value().attr("srcset") {
            references.extend(parse_srcset(srcset).into_iter().map(|raw| Reference {
                kind: ReferenceKind::ResponsiveImageSet,
                raw,
            }));
        }
    }
}

/// Returns the reference carried by an element's `href`/`src` attribute
fn primary_reference<'a>(element: &ElementRef<'a>) -> Option<(ReferenceKind, &'a str)> {
    let value = element.value();
    let (kind, attr) = match value.name() {
        "a" => (ReferenceKind::Anchor, "href"),
        "img" => (ReferenceKind::Image, "src"),
        "script" => (ReferenceKind::Script, "src"),
        "link" => (ReferenceKind::StylesheetLink, "href"),
        "video" => (ReferenceKind::Video, "src"),
        "audio" => (ReferenceKind::Audio, "src"),
        "source" => (ReferenceKind::Source, "src"),
        _ => return None,
    };

    value.attr(attr).map(|raw| (kind, raw))
}

/// Splits a `srcset` value into candidate URLs
fn parse_srcset(srcset: &str) -> Vec<String> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Extracts title, description and Open Graph metadata
///
/// The first matching tag wins; values are trimmed. `<meta>` attribute names
/// are matched case-insensitively and tags with empty `content` are skipped.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        title: extract_title(&document),
        description: extract_meta_content(&document, "name", "description"),
        og_title: extract_meta_content(&document, "property", "og:title"),
        og_description: extract_meta_content(&document, "property", "og:description"),
        og_image: extract_meta_content(&document, "property", "og:image"),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Finds the first `<meta {key}="{expected}" content="...">` with non-empty content
fn extract_meta_content(document: &Html, key: &str, expected: &str) -> String {
    let Ok(meta_selector) = Selector::parse("meta[content]") else {
        return String::new();
    };

    document
        .select(&meta_selector)
        .filter(|element| {
            element
                .value()
                .attr(key)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
        })
        .filter_map(|element| element.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}
