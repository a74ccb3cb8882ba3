//! JSON report output

use crate::output::traits::{OutputResult, ReportWriter};
use crate::report::{FailureReport, LinkReport};

/// Writes `report.json`, the structured form of the report
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl ReportWriter for JsonWriter {
    fn file_name(&self) -> &'static str {
        "report.json"
    }

    fn render(&self, report: &LinkReport) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn render_failure(&self, failure: &FailureReport) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(failure)?)
    }
}
