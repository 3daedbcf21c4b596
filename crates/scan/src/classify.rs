//! Threshold-based finding classification.
//!
//! Each finding with a recognized severity gets an annotation message and
//! an unhealthy flag. Findings whose severity string falls outside the
//! model produce no classification: they stay informational and never
//! contribute to pass/fail. Classification is a single sequential pass in
//! finding order; the run-level unhealthy flag is monotone.

use hullscan_core::{AnnotationLevel, Error, Finding, Result, Severity};

/// Parse the configured severity threshold name.
///
/// `None` or an empty name means "never fail". Performed before any
/// network or process activity.
///
/// # Errors
///
/// `Configuration` error for an unrecognized severity name.
pub fn parse_threshold(name: Option<&str>) -> Result<Option<Severity>> {
    match name {
        None => Ok(None),
        Some("") => Ok(None),
        Some(name) => Severity::from_name(name).map(Some).ok_or_else(|| {
            Error::configuration(format!("unknown severity threshold \"{name}\""))
        }),
    }
}

/// Classification of one finding with a recognized severity.
#[derive(Debug, Clone)]
pub struct Classification {
    pub severity: Severity,
    pub message: String,
    pub unhealthy: bool,
    /// Console table line, rendered only for unhealthy findings.
    pub table_line: Option<String>,
}

/// Result of classifying a whole scan.
#[derive(Debug)]
pub struct ClassifySummary {
    /// One entry per finding with a recognized severity, in finding order.
    pub classifications: Vec<Classification>,
    /// True once any finding is unhealthy; never reset within a run.
    pub any_unhealthy: bool,
}

/// Classify findings against a threshold.
///
/// A finding is unhealthy when a threshold is configured and its severity
/// is greater than or equal to it (inclusive: the boundary severity fails).
/// With no threshold, nothing is ever unhealthy.
#[must_use]
pub fn classify(findings: &[Finding], threshold: Option<Severity>) -> ClassifySummary {
    let mut classifications = Vec::new();
    let mut any_unhealthy = false;

    for finding in findings {
        let Some(severity) = Severity::from_name(&finding.severity) else {
            continue;
        };
        let unhealthy = threshold.is_some_and(|t| severity >= t);
        any_unhealthy = any_unhealthy || unhealthy;
        classifications.push(Classification {
            severity,
            message: annotation_message(finding, severity),
            unhealthy,
            table_line: unhealthy.then(|| render_table_line(finding, severity)),
        });
    }

    ClassifySummary {
        classifications,
        any_unhealthy,
    }
}

fn annotation_message(finding: &Finding, severity: Severity) -> String {
    format!(
        "{} - {} severity - {} vulnerability in {}",
        finding.id,
        severity.name(),
        finding.title.as_deref().unwrap_or_default(),
        finding.package_name
    )
}

/// Render the fixed-width, severity-tagged console line for a finding,
/// colored for a color-capable console.
#[must_use]
pub fn render_table_line(finding: &Finding, severity: Severity) -> String {
    let color = match severity {
        Severity::Critical => "\x1b[1;31m",
        Severity::High => "\x1b[31m",
        Severity::Medium => "\x1b[33m",
        Severity::Low => "\x1b[36m",
        Severity::Unknown => "\x1b[37m",
    };
    format!(
        "{:<24} {:<20} {}{:<10}\x1b[0m {}",
        finding.package_name,
        finding.id,
        color,
        severity.name(),
        finding.title.as_deref().unwrap_or_default()
    )
}

/// Abstract destination for classified findings.
///
/// The core decides only which channel and which message each finding maps
/// to; how a channel is displayed belongs to the host surface.
pub trait AnnotationSink {
    fn notice(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Emit every classification through the sink, routed by severity level.
///
/// Emission order matches finding order; this is an observable contract
/// for downstream log readers.
pub fn emit_annotations(sink: &mut dyn AnnotationSink, classifications: &[Classification]) {
    for classification in classifications {
        match classification.severity.annotation_level() {
            AnnotationLevel::Notice => sink.notice(&classification.message),
            AnnotationLevel::Warning => sink.warning(&classification.message),
            AnnotationLevel::Error => sink.error(&classification.message),
        }
    }
}
