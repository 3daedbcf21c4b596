//! Command-line surface.

use clap::Parser;
use std::path::PathBuf;

/// Scan a container image with an external vulnerability scanner and gate
/// the run on a severity threshold.
#[derive(Parser, Debug)]
#[command(name = "hullscan", version, about)]
pub struct Cli {
    /// Image reference to scan (mutually exclusive with --tarball)
    #[arg(long)]
    pub image: Option<String>,

    /// Path to an image archive to scan (mutually exclusive with --image)
    #[arg(long)]
    pub tarball: Option<PathBuf>,

    /// Scanner version: "latest", a release tag, or a commit token
    #[arg(long, default_value = "latest")]
    pub tool_version: String,

    /// Severity filter passed through to the scanner (e.g. "HIGH,CRITICAL")
    #[arg(long)]
    pub severity: Option<String>,

    /// Minimum severity at which a finding fails the run
    #[arg(long)]
    pub severity_threshold: Option<String>,

    /// Skip findings without a fixed version
    #[arg(long)]
    pub ignore_unfixed: bool,

    /// Emit one annotation per classified finding
    #[arg(long)]
    pub annotations: bool,

    /// Dockerfile recorded as the SARIF artifact location; without it the
    /// SARIF output is skipped
    #[arg(long)]
    pub dockerfile: Option<PathBuf>,

    /// Auth token forwarded to the scanner's environment
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Binary cache directory (defaults to the user cache dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_scan() {
        let cli = Cli::try_parse_from([
            "hullscan",
            "--image",
            "alpine:3.9",
            "--severity-threshold",
            "HIGH",
            "--annotations",
        ])
        .unwrap();
        assert_eq!(cli.image.as_deref(), Some("alpine:3.9"));
        assert_eq!(cli.severity_threshold.as_deref(), Some("HIGH"));
        assert!(cli.annotations);
        assert_eq!(cli.tool_version, "latest");
    }

    #[test]
    fn parses_tarball_scan_with_filter() {
        let cli = Cli::try_parse_from([
            "hullscan",
            "--tarball",
            "image.tar",
            "--severity",
            "HIGH,CRITICAL",
            "--ignore-unfixed",
        ])
        .unwrap();
        assert!(cli.image.is_none());
        assert_eq!(cli.tarball, Some(PathBuf::from("image.tar")));
        assert_eq!(cli.severity.as_deref(), Some("HIGH,CRITICAL"));
        assert!(cli.ignore_unfixed);
    }
}
