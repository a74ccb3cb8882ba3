//! Report writer trait and output errors

use crate::report::{FailureReport, LinkReport};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A persisted rendering of the link report
pub trait ReportWriter {
    /// File name written inside the report directory
    fn file_name(&self) -> &'static str;

    /// Renders a completed run
    fn render(&self, report: &LinkReport) -> OutputResult<String>;

    /// Renders a run that failed before producing a report
    fn render_failure(&self, failure: &FailureReport) -> OutputResult<String>;

    /// Renders and writes a completed run, creating the directory if needed
    fn write(&self, report: &LinkReport, dir: &Path) -> OutputResult<PathBuf> {
        let content = self.render(report)?;
        write_file(dir, self.file_name(), &content)
    }

    /// Renders and writes a failed run, creating the directory if needed
    fn write_failure(&self, failure: &FailureReport, dir: &Path) -> OutputResult<PathBuf> {
        let content = self.render_failure(failure)?;
        write_file(dir, self.file_name(), &content)
    }
}

fn write_file(dir: &Path, file_name: &str, content: &str) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}
