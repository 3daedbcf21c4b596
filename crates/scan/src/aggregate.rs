//! Structured report aggregation.
//!
//! Parses the JSON output file into normalized findings. Sequence order is
//! preserved end-to-end: results in file order, vulnerabilities within each
//! result in file order, no re-sorting.

use hullscan_core::{Error, Finding, Report, Result};
use std::path::Path;
use tracing::debug;

/// Parse the structured report at `json_path` into findings.
///
/// A report with zero results is a normal success case and yields an empty
/// sequence.
///
/// # Errors
///
/// `ReportParse` on malformed JSON; an I/O error when the file cannot be
/// read.
pub fn aggregate(json_path: &Path) -> Result<Vec<Finding>> {
    let raw = std::fs::read_to_string(json_path)
        .map_err(|e| Error::io(e, Some(json_path.to_path_buf()), "read scan report"))?;
    let report: Report = serde_json::from_str(raw.trim()).map_err(|e| {
        Error::report_parse(format!("{} in {}", e, json_path.display()))
    })?;
    let findings = report.findings();
    debug!(count = findings.len(), "Aggregated scan report");
    Ok(findings)
}
