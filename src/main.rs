//! Sitecheck main entry point
//!
//! This is the command-line interface for the sitecheck link validator.

use anyhow::Context;
use clap::Parser;
use sitecheck::config::{parse_config, parse_domain_list, validate_config, Config, OutputConfig};
use sitecheck::output::{write_failure_report, write_reports};
use sitecheck::run_link_check;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sitecheck: a link and asset validator for deployed websites
///
/// Sitecheck crawls a site root (and optionally a staging root), checks every
/// link and asset it references, records redirect chains and loops, and audits
/// title, description and Open Graph metadata. Results are written as
/// `report.json` and `report.md`.
#[derive(Parser, Debug)]
#[command(name = "sitecheck")]
#[command(version = "1.0.0")]
#[command(about = "A link and asset validator for deployed websites", long_about = None)]
struct Cli {
    /// Optional TOML configuration file, overridden by environment and flags
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Primary site root to crawl
    #[arg(long, env = "LINK_CHECK_BASE")]
    base: Option<String>,

    /// Optional second site root, crawled after the primary one
    #[arg(long, env = "LINK_CHECK_STAGING")]
    staging: Option<String>,

    /// Comma-separated hostname substrings to skip
    #[arg(long, env = "LINK_CHECK_IGNORE_DOMAINS")]
    ignore_domains: Option<String>,

    /// Fail the run when external links are broken
    #[arg(long, env = "LINK_CHECK_FAIL_ON_EXTERNAL")]
    fail_on_external: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "LINK_CHECK_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Maximum pages crawled per target
    #[arg(long, env = "LINK_CHECK_MAX_PAGES")]
    max_pages: Option<usize>,

    /// Directory receiving report.json and report.md
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut report_dir = cli
        .report_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(OutputConfig::default().report_dir));

    match run(&cli, &mut report_dir).await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!("Link check failed: {}", message);
            if let Err(write_err) = write_failure_report(&message, &report_dir) {
                tracing::error!("Failed to write failure report: {}", write_err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitecheck=info,warn"),
            1 => EnvFilter::new("sitecheck=debug,info"),
            2 => EnvFilter::new("sitecheck=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves configuration, runs the check and writes the reports
///
/// `report_dir` is updated as soon as the effective directory is known, so a
/// failure report lands where the full report would have.
async fn run(cli: &Cli, report_dir: &mut PathBuf) -> anyhow::Result<ExitCode> {
    let config = resolve_config(cli)?;
    *report_dir = PathBuf::from(&config.output.report_dir);

    tracing::info!("Targets: {}", config.targets().join(", "));
    if !config.ignore_domains.is_empty() {
        tracing::info!("Ignoring domains: {}", config.ignore_domains.join(", "));
    }

    let report = run_link_check(&config).await?;

    let paths = write_reports(&report, report_dir)
        .with_context(|| format!("Failed to write reports to {}", report_dir.display()))?;
    tracing::info!("Link check complete. Reports written to:");
    for path in &paths {
        tracing::info!("- {}", path.display());
    }

    let critical = report.critical_issue_count();
    tracing::info!(
        "Critical issues: {}, external fail mode: {}",
        critical,
        config.fail_on_external
    );

    if report.is_failure(config.fail_on_external) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Layers defaults, the optional TOML file, environment and flags, then validates
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    if let Some(base) = &cli.base {
        config.targets.base_url = base.trim().to_string();
    }
    if let Some(staging) = &cli.staging {
        config.targets.staging_url = Some(staging.trim().to_string());
    }
    if let Some(domains) = &cli.ignore_domains {
        config.ignore_domains = parse_domain_list(domains);
    }
    if cli.fail_on_external {
        config.fail_on_external = true;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawler.timeout_ms = timeout_ms;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(dir) = &cli.report_dir {
        config.output.report_dir = dir.to_string_lossy().into_owned();
    }

    validate_config(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading configuration from: {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
