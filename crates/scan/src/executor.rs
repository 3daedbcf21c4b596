//! Multi-format scan execution.
//!
//! One logical scan invokes the scanner once per output format, each run a
//! fresh process producing a distinct output file in the session's working
//! directory. The format order is fixed (table, json, sarif) so logs stay
//! reproducible; the JSON pass is the sole input to aggregation.

use crate::aggregate;
use crate::process::ProcessRunner;
use crate::request::{ScanRequest, ScanTargetRef};
use crate::sarif;
use hullscan_core::{Error, Finding, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scanner output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
    Table,
    Json,
    Sarif,
}

impl ScanFormat {
    /// Output file extension and error label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Sarif => "sarif",
        }
    }
}

impl std::fmt::Display for ScanFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifacts and findings of one completed scan session.
#[derive(Debug)]
pub struct ScanOutcome {
    pub table: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Absent when the SARIF pass was soft-skipped.
    pub sarif: Option<PathBuf>,
    /// Findings in report order.
    pub findings: Vec<Finding>,
}

/// Drives the scanner once per output format.
pub struct ScanExecutor {
    runner: ProcessRunner,
    work_dir: PathBuf,
}

impl ScanExecutor {
    /// Create an executor writing output files into `work_dir`.
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner: ProcessRunner::new(),
            work_dir: work_dir.into(),
        }
    }

    /// Run the full multi-format scan for a request.
    ///
    /// The table pass echoes scanner output; json and sarif run silently.
    /// The SARIF pass is skipped with a warning when no dockerfile is
    /// available for the template - the one soft partial-failure path.
    ///
    /// # Errors
    ///
    /// `ScanExecution` when a pass exits non-zero with stderr output,
    /// `ScanResultMissing` when a pass leaves no output file, and
    /// `ReportParse` when the JSON report is malformed. Any of these aborts
    /// the whole scan.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome> {
        let table = self.scan_format(request, ScanFormat::Table, false).await?;
        let json = self.scan_format(request, ScanFormat::Json, true).await?;

        let sarif = match &request.dockerfile {
            Some(dockerfile) => Some(self.scan_sarif(request, dockerfile).await?),
            None => {
                warn!("No dockerfile available for the SARIF template; skipping sarif output");
                None
            }
        };

        let findings = aggregate::aggregate(&json)?;
        Ok(ScanOutcome {
            table: Some(table),
            json: Some(json),
            sarif,
            findings,
        })
    }

    async fn scan_sarif(&self, request: &ScanRequest, dockerfile: &Path) -> Result<PathBuf> {
        let tpl = sarif::write_template(&self.work_dir, dockerfile)?;
        self.run_scanner(
            request,
            ScanFormat::Sarif,
            vec![
                "--format".to_string(),
                "template".to_string(),
                "--template".to_string(),
                format!("@{}", tpl.display()),
            ],
            true,
        )
        .await
    }

    async fn scan_format(
        &self,
        request: &ScanRequest,
        format: ScanFormat,
        silent: bool,
    ) -> Result<PathBuf> {
        let format_args = vec!["--format".to_string(), format.as_str().to_string()];
        self.run_scanner(request, format, format_args, silent).await
    }

    async fn run_scanner(
        &self,
        request: &ScanRequest,
        format: ScanFormat,
        format_args: Vec<String>,
        silent: bool,
    ) -> Result<PathBuf> {
        let out_file = self.work_dir.join(format!("result.{format}"));

        let mut args: Vec<String> = vec![
            "image".to_string(),
            "--no-progress".to_string(),
            "--output".to_string(),
            out_file.to_string_lossy().into_owned(),
        ];
        if let Some(severity) = &request.severity_filter {
            args.push("--severity".to_string());
            args.push(severity.clone());
        }
        if request.ignore_unfixed {
            args.push("--ignore-unfixed".to_string());
        }
        args.extend(format_args);
        match &request.target {
            ScanTargetRef::Image(image) => args.push(image.clone()),
            ScanTargetRef::Tarball(tarball) => {
                args.push("--input".to_string());
                args.push(tarball.to_string_lossy().into_owned());
            }
        }

        let mut env = HashMap::new();
        if let Some(token) = &request.auth_token {
            env.insert("GITHUB_TOKEN".to_string(), token.clone());
        }

        debug!(%format, ?args, "Running scanner");
        let output = self
            .runner
            .run(&request.binary_path, &args, &env, silent)
            .await?;

        if output.exit_code != 0 && !output.stderr.trim().is_empty() {
            return Err(Error::scan_execution(output.stderr.trim()));
        }
        if !out_file.exists() {
            return Err(Error::scan_result_missing(format.as_str()));
        }
        Ok(out_file)
    }
}
