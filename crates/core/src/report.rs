//! Scanner report model.
//!
//! Mirrors the structured (JSON) output of the scanner: a top-level
//! `Results` array, each entry carrying a `Vulnerabilities` array. Field
//! names follow the upstream schema. The model is tolerant: missing arrays
//! default to empty and unknown fields are ignored, so a report with zero
//! results is a normal empty sequence rather than a failure.

use serde::Deserialize;

/// Maximum length of a title backfilled from a description.
pub const TITLE_BACKFILL_MAX: usize = 48;

/// Top-level structured scan report.
#[derive(Debug, Default, Deserialize)]
pub struct Report {
    #[serde(rename = "Results", default)]
    pub results: Vec<ScanTarget>,
}

/// One scanned target (an image layer source, a lockfile, ...).
#[derive(Debug, Default, Deserialize)]
pub struct ScanTarget {
    #[serde(rename = "Target", default)]
    pub target: String,
    #[serde(rename = "Vulnerabilities", default)]
    pub vulnerabilities: Vec<RawVulnerability>,
}

/// A vulnerability entry as reported by the scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVulnerability {
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: String,
    #[serde(rename = "PkgName", default)]
    pub pkg_name: String,
    #[serde(rename = "InstalledVersion", default)]
    pub installed_version: String,
    #[serde(rename = "FixedVersion", default)]
    pub fixed_version: Option<String>,
    #[serde(rename = "Severity", default)]
    pub severity: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "PrimaryURL", default)]
    pub primary_url: Option<String>,
}

/// A normalized finding, produced once per reported vulnerability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub package_name: String,
    pub installed_version: String,
    pub fixed_version: Option<String>,
    /// Severity string as reported; may fall outside the severity model.
    pub severity: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_url: Option<String>,
}

impl Report {
    /// Flatten the report into findings, preserving file order end-to-end.
    ///
    /// The title backfill is applied here, exactly once per finding.
    #[must_use]
    pub fn findings(self) -> Vec<Finding> {
        self.results
            .into_iter()
            .flat_map(|result| result.vulnerabilities)
            .map(Finding::from)
            .collect()
    }
}

impl From<RawVulnerability> for Finding {
    fn from(raw: RawVulnerability) -> Self {
        let title = match raw.title.filter(|t| !t.is_empty()) {
            Some(title) => Some(title),
            None => raw.description.as_deref().map(truncate_title),
        };
        Self {
            id: raw.vulnerability_id,
            package_name: raw.pkg_name,
            installed_version: raw.installed_version,
            fixed_version: raw.fixed_version,
            severity: raw.severity,
            title,
            description: raw.description,
            primary_url: raw.primary_url,
        }
    }
}

/// Truncate a description into a bounded title with an ellipsis marker.
fn truncate_title(description: &str) -> String {
    if description.chars().count() <= TITLE_BACKFILL_MAX {
        return description.to_string();
    }
    let truncated: String = description.chars().take(TITLE_BACKFILL_MAX).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, description: Option<&str>) -> RawVulnerability {
        RawVulnerability {
            vulnerability_id: "CVE-2021-1234".to_string(),
            pkg_name: "musl".to_string(),
            installed_version: "1.1.20-r4".to_string(),
            fixed_version: Some("1.1.20-r5".to_string()),
            severity: "HIGH".to_string(),
            title: title.map(String::from),
            description: description.map(String::from),
            primary_url: None,
        }
    }

    #[test]
    fn empty_report_yields_empty_findings() {
        let report: Report = serde_json::from_str(r#"{"Results": []}"#).unwrap();
        assert!(report.findings().is_empty());
    }

    #[test]
    fn missing_results_defaults_to_empty() {
        let report: Report = serde_json::from_str(r#"{"SchemaVersion": 2}"#).unwrap();
        assert!(report.findings().is_empty());
    }

    #[test]
    fn findings_preserve_file_order() {
        let json = r#"{
            "Results": [
                {"Target": "a", "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-1", "PkgName": "p1", "InstalledVersion": "1", "Severity": "LOW"},
                    {"VulnerabilityID": "CVE-2", "PkgName": "p2", "InstalledVersion": "1", "Severity": "HIGH"}
                ]},
                {"Target": "b", "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-3", "PkgName": "p3", "InstalledVersion": "1", "Severity": "MEDIUM"}
                ]}
            ]
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = report.findings().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["CVE-1", "CVE-2", "CVE-3"]);
    }

    #[test]
    fn existing_title_is_left_unmodified() {
        let finding = Finding::from(raw(Some("Original title"), Some("Some description")));
        assert_eq!(finding.title.as_deref(), Some("Original title"));
    }

    #[test]
    fn long_description_is_truncated_with_marker() {
        let long = "a".repeat(200);
        let finding = Finding::from(raw(None, Some(&long)));
        let title = finding.title.unwrap();
        assert!(title.ends_with("..."));
        assert!(title.chars().count() <= TITLE_BACKFILL_MAX + 3);
    }

    #[test]
    fn short_description_is_used_whole() {
        let finding = Finding::from(raw(None, Some("short")));
        assert_eq!(finding.title.as_deref(), Some("short"));
    }

    #[test]
    fn empty_title_is_backfilled() {
        let finding = Finding::from(raw(Some(""), Some("fallback text")));
        assert_eq!(finding.title.as_deref(), Some("fallback text"));
    }

    #[test]
    fn no_title_and_no_description_stays_absent() {
        let finding = Finding::from(raw(None, None));
        assert!(finding.title.is_none());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let json = r#"{
            "SchemaVersion": 2,
            "ArtifactName": "alpine:3.9",
            "Metadata": {"ImageID": "sha256:deadbeef"},
            "Results": [
                {"Target": "alpine:3.9", "Class": "os-pkgs", "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-1", "PkgName": "p", "InstalledVersion": "1",
                     "Severity": "LOW", "CVSS": {"nvd": {"V3Score": 5.0}}}
                ]}
            ]
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.findings().len(), 1);
    }
}
