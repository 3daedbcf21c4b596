//! Run orchestration: install the scanner, execute the multi-format scan,
//! classify findings and gate the exit status on the severity threshold.

use crate::args::Cli;
use hullscan_core::{Error, Platform, Result};
use hullscan_scan::{
    AnnotationSink, ProcessRunner, ScanExecutor, ScanOutcome, ScanRequest, ScanTargetRef,
    classify, emit_annotations, parse_threshold,
};
use hullscan_tools::{DEFAULT_INDEX_URL, DirToolCache, Installer, ReleaseResolver};
use miette::miette;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Annotation sink writing workflow-command style lines to stdout.
#[derive(Debug, Default)]
struct ConsoleAnnotationSink;

impl AnnotationSink for ConsoleAnnotationSink {
    fn notice(&mut self, message: &str) {
        println!("::notice::{message}");
    }
    fn warning(&mut self, message: &str) {
        println!("::warning::{message}");
    }
    fn error(&mut self, message: &str) {
        println!("::error::{message}");
    }
}

/// Execute the whole run. Returns an error for any fatal failure, including
/// the threshold gate.
pub async fn run(cli: Cli) -> miette::Result<()> {
    // Threshold and target validation happen before any network or
    // process activity.
    let threshold =
        parse_threshold(cli.severity_threshold.as_deref()).map_err(miette::Report::new)?;
    let target = ScanTargetRef::from_options(cli.image.clone(), cli.tarball.clone())
        .map_err(miette::Report::new)?;

    let bin = install_scanner(&cli).await.map_err(miette::Report::new)?;
    match scanner_version(&bin).await {
        Ok(version) => info!(%version, "Scanner ready"),
        Err(e) => warn!("Could not determine scanner version: {e}"),
    }

    let work_dir = tempfile::Builder::new()
        .prefix("hullscan-")
        .tempdir()
        .map_err(|e| miette!("failed to create working directory: {e}"))?;

    let request = ScanRequest::for_target(bin, target)
        .with_severity_filter(cli.severity.clone())
        .with_ignore_unfixed(cli.ignore_unfixed)
        .with_auth_token(cli.github_token.clone())
        .with_dockerfile(cli.dockerfile.clone());

    let executor = ScanExecutor::new(work_dir.path());
    let outcome = executor.scan(&request).await.map_err(miette::Report::new)?;

    print_table(&outcome);
    print_outputs(&outcome);

    let summary = classify(&outcome.findings, threshold);
    if cli.annotations {
        let mut sink = ConsoleAnnotationSink;
        emit_annotations(&mut sink, &summary.classifications);
    }
    for classification in &summary.classifications {
        if let Some(line) = &classification.table_line {
            println!("{line}");
        }
    }

    if summary.any_unhealthy {
        let threshold_name = threshold.map_or("UNSET", |t| t.name());
        let count = summary
            .classifications
            .iter()
            .filter(|c| c.unhealthy)
            .count();
        return Err(miette!(
            "found {count} vulnerabilities at or above the {threshold_name} severity threshold"
        ));
    }
    Ok(())
}

async fn install_scanner(cli: &Cli) -> Result<PathBuf> {
    let cache_root = cli.cache_dir.clone().unwrap_or_else(default_cache_dir);
    let resolver = ReleaseResolver::new(hullscan_tools::http_client(), DEFAULT_INDEX_URL);
    let installer = Installer::new(resolver, DirToolCache::new(cache_root), Platform::current());
    info!(version = %cli.tool_version, "Installing scanner");
    installer.install(&cli.tool_version).await
}

/// Query the installed scanner for its version string.
async fn scanner_version(bin: &Path) -> Result<String> {
    let runner = ProcessRunner::new();
    let output = runner
        .run(bin, &["--version".to_string()], &HashMap::new(), true)
        .await?;
    if output.exit_code != 0 && !output.stderr.trim().is_empty() {
        return Err(Error::process(output.stderr.trim().to_string()));
    }
    hullscan_tools::version::parse_version(output.stdout.trim())
}

fn print_table(outcome: &ScanOutcome) {
    if let Some(table) = &outcome.table
        && let Ok(contents) = std::fs::read_to_string(table)
    {
        println!("{}", contents.trim());
    }
}

/// Surface the json and sarif artifact paths as named outputs when their
/// files are non-empty.
fn print_outputs(outcome: &ScanOutcome) {
    for (name, file) in [("json", &outcome.json), ("sarif", &outcome.sarif)] {
        if let Some(path) = file
            && std::fs::metadata(path).is_ok_and(|m| m.len() > 0)
        {
            println!("{name}={}", path.display());
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("hullscan")
        .join("tools")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn missing_target_is_rejected_before_any_work() {
        let cli = Cli::try_parse_from(["hullscan"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("image or tarball input required"));
    }

    #[tokio::test]
    async fn conflicting_targets_are_rejected_before_any_work() {
        let cli = Cli::try_parse_from([
            "hullscan",
            "--image",
            "alpine:3.9",
            "--tarball",
            "image.tar",
        ])
        .unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[tokio::test]
    async fn bad_threshold_is_rejected_before_any_work() {
        let cli = Cli::try_parse_from([
            "hullscan",
            "--image",
            "alpine:3.9",
            "--severity-threshold",
            "SEVERE",
        ])
        .unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("SEVERE"));
    }

    #[test]
    fn default_cache_dir_is_namespaced() {
        assert!(default_cache_dir().ends_with("hullscan/tools"));
    }
}
