//! Scan request construction.

use hullscan_core::{Error, Result};
use std::path::PathBuf;

/// The scan target: a registry image reference or a local image archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTargetRef {
    Image(String),
    Tarball(PathBuf),
}

impl ScanTargetRef {
    /// Select the target from optional inputs, enforcing that exactly one
    /// of image/tarball is set.
    ///
    /// # Errors
    ///
    /// `Configuration` error when both or neither target is given. This is
    /// checked before any network or process activity.
    pub fn from_options(image: Option<String>, tarball: Option<PathBuf>) -> Result<Self> {
        match (image, tarball) {
            (Some(image), None) => Ok(Self::Image(image)),
            (None, Some(tarball)) => Ok(Self::Tarball(tarball)),
            (None, None) => Err(Error::configuration("image or tarball input required")),
            (Some(_), Some(_)) => Err(Error::configuration(
                "image and tarball inputs are mutually exclusive",
            )),
        }
    }
}

/// Immutable parameters of one logical scan, constructed once per invocation.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub binary_path: PathBuf,
    pub target: ScanTargetRef,
    pub severity_filter: Option<String>,
    pub ignore_unfixed: bool,
    pub auth_token: Option<String>,
    /// Source path recorded in SARIF locations; without it the SARIF
    /// format pass is skipped.
    pub dockerfile: Option<PathBuf>,
}

impl ScanRequest {
    /// Build a request, enforcing that exactly one of image/tarball is set.
    ///
    /// # Errors
    ///
    /// `Configuration` error when both or neither target is given. This is
    /// checked before any process is launched.
    pub fn new(
        binary_path: PathBuf,
        image: Option<String>,
        tarball: Option<PathBuf>,
    ) -> Result<Self> {
        let target = ScanTargetRef::from_options(image, tarball)?;
        Ok(Self::for_target(binary_path, target))
    }

    /// Build a request from an already-validated target.
    #[must_use]
    pub fn for_target(binary_path: PathBuf, target: ScanTargetRef) -> Self {
        Self {
            binary_path,
            target,
            severity_filter: None,
            ignore_unfixed: false,
            auth_token: None,
            dockerfile: None,
        }
    }

    /// Set the severity filter passed through to the scanner unchanged.
    #[must_use]
    pub fn with_severity_filter(mut self, filter: Option<String>) -> Self {
        self.severity_filter = filter.filter(|f| !f.is_empty());
        self
    }

    /// Skip findings without a fixed version.
    #[must_use]
    pub fn with_ignore_unfixed(mut self, ignore_unfixed: bool) -> Self {
        self.ignore_unfixed = ignore_unfixed;
        self
    }

    /// Auth token injected into the scanner's environment.
    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Dockerfile path recorded in SARIF output.
    #[must_use]
    pub fn with_dockerfile(mut self, dockerfile: Option<PathBuf>) -> Self {
        self.dockerfile = dockerfile;
        self
    }
}
