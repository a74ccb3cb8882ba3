use serde::Deserialize;

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

/// Default per-target crawl budget
pub const DEFAULT_MAX_PAGES: usize = 120;

/// Default number of redirects followed for one logical fetch
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Main configuration structure for sitecheck
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Lowercase hostname substrings excluded from checking
    #[serde(default)]
    pub ignore_domains: Vec<String>,

    /// Whether broken external links should fail the run
    #[serde(default)]
    pub fail_on_external: bool,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Returns the configured site roots in crawl order (base first, then staging)
    ///
    /// Empty entries are skipped, so an unset staging URL yields a single target.
    pub fn targets(&self) -> Vec<String> {
        std::iter::once(self.targets.base_url.as_str())
            .chain(self.targets.staging_url.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Site roots to crawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetsConfig {
    /// Primary target, required
    #[serde(default)]
    pub base_url: String,

    /// Optional second target (e.g. a staging deployment)
    #[serde(default)]
    pub staging_url: Option<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Timeout for each individual request (each redirect hop gets a fresh window)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of pages crawled per target
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum number of redirects followed for one URL
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_pages: DEFAULT_MAX_PAGES,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving `report.json` and `report.md`
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_user_agent() -> String {
    format!("sitecheck/{}", env!("CARGO_PKG_VERSION"))
}

fn default_report_dir() -> String {
    "reports/link-check".to_string()
}
