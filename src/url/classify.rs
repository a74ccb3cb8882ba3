use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Asset family derived from a path's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Font,
    Static,
    File,
    Unknown,
}

impl AssetKind {
    /// Returns the lowercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Font => "font",
            Self::Static => "static",
            Self::File => "file",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a URL path by extension
///
/// Only the path should be passed in (no query or fragment). Matching is
/// case-insensitive; paths without a recognised extension are `Unknown`.
///
/// # Examples
///
/// ```
/// use sitecheck::url::{classify_asset, AssetKind};
///
/// assert_eq!(classify_asset("/img/Logo.PNG"), AssetKind::Image);
/// assert_eq!(classify_asset("/fonts/inter.woff2"), AssetKind::Font);
/// assert_eq!(classify_asset("/about/"), AssetKind::Unknown);
/// ```
pub fn classify_asset(path: &str) -> AssetKind {
    let lower = path.to_ascii_lowercase();
    let Some((_, ext)) = lower.rsplit_once('.') else {
        return AssetKind::Unknown;
    };

    match ext {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "avif" | "heic" | "ico" => {
            AssetKind::Image
        }
        "mp4" | "webm" | "ogg" | "mov" => AssetKind::Video,
        "woff" | "woff2" | "ttf" | "otf" | "eot" => AssetKind::Font,
        "js" | "mjs" | "cjs" | "css" | "map" => AssetKind::Static,
        "pdf" | "zip" | "json" | "txt" => AssetKind::File,
        _ => AssetKind::Unknown,
    }
}

/// Guesses from path shape whether a URL serves an HTML page
///
/// True when the path ends in `/` or its last segment has no extension.
/// A leading dot (`/.well-known`) does not count as an extension.
pub fn likely_html(url: &Url) -> bool {
    let path = url.path();
    if path.ends_with('/') {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or(path);
    !matches!(last_segment.rfind('.'), Some(idx) if idx > 0)
}
