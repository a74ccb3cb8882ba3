//! Output module for persisting link reports
//!
//! This module handles:
//! - Writing the structured JSON report
//! - Writing the human-readable markdown report
//! - Writing a minimal failure report when a run cannot complete

mod json;
mod markdown;
mod traits;

pub use json::JsonWriter;
pub use markdown::{format_markdown_report, MarkdownWriter};
pub use traits::{OutputError, OutputResult, ReportWriter};

use crate::report::{FailureReport, LinkReport};
use std::path::{Path, PathBuf};

/// Every writer used for a run, in the order files are written
fn writers() -> [&'static dyn ReportWriter; 2] {
    [&JsonWriter, &MarkdownWriter]
}

/// Writes `report.json` and `report.md` into `dir`
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the written files
/// * `Err(OutputError)` - The directory or a file could not be written
pub fn write_reports(report: &LinkReport, dir: &Path) -> OutputResult<Vec<PathBuf>> {
    writers()
        .into_iter()
        .map(|writer| writer.write(report, dir))
        .collect()
}

/// Writes the minimal failure variants of both reports into `dir`
pub fn write_failure_report(error: &str, dir: &Path) -> OutputResult<Vec<PathBuf>> {
    let failure = FailureReport::new(error);
    writers()
        .into_iter()
        .map(|writer| writer.write_failure(&failure, dir))
        .collect()
}
