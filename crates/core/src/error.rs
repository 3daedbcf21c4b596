//! Error types for the hullscan crates

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hullscan operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Configuration error, detected before any network or process activity
    #[error("Configuration error: {message}")]
    #[diagnostic(code(hullscan::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// The release index has no entry for the requested version specifier
    #[error("Cannot find scanner release for \"{spec}\"")]
    #[diagnostic(code(hullscan::release::not_found))]
    ReleaseNotFound {
        /// The version specifier that could not be resolved
        spec: String,
    },

    /// Transport or non-2xx failure while querying the release index
    #[error("Failed to fetch release index (HTTP {status}): {body}")]
    #[diagnostic(code(hullscan::release::fetch))]
    ReleaseFetch {
        /// HTTP status code, or 0 for transport-level failures
        status: u16,
        /// Response body or transport error text
        body: String,
    },

    /// The normalized release tag is not a valid semantic version
    #[error("Invalid scanner version \"{version}\"")]
    #[diagnostic(code(hullscan::version::invalid))]
    InvalidVersion {
        /// The version string that failed validation
        version: String,
    },

    /// Archive download failure
    #[error("Failed to download {url}: {message}")]
    #[diagnostic(code(hullscan::download))]
    Download {
        /// The URL that could not be downloaded
        url: String,
        /// The underlying failure description
        message: String,
    },

    /// Archive extraction failure
    #[error("Failed to extract scanner archive: {message}")]
    #[diagnostic(code(hullscan::extraction))]
    Extraction {
        /// The underlying failure description
        message: String,
    },

    /// The scanner exited non-zero and produced diagnostics on stderr
    #[error("Scan failed: {stderr}")]
    #[diagnostic(code(hullscan::scan::execution))]
    ScanExecution {
        /// Trimmed stderr text from the scanner process
        stderr: String,
    },

    /// The scanner exited but the expected output file is absent
    #[error("Scan result not found for {format} output format")]
    #[diagnostic(code(hullscan::scan::result_missing))]
    ScanResultMissing {
        /// The output format whose file is missing
        format: String,
    },

    /// The structured scan report could not be parsed
    #[error("Failed to parse scan report: {message}")]
    #[diagnostic(code(hullscan::report::parse))]
    ReportParse {
        /// The underlying parse failure description
        message: String,
    },

    /// Process-level failure (spawn, version query)
    #[error("Process execution failed: {message}")]
    #[diagnostic(code(hullscan::process))]
    Process {
        /// The error message describing the process failure
        message: String,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(hullscan::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a release-not-found error for a version specifier
    pub fn release_not_found(spec: impl Into<String>) -> Self {
        Self::ReleaseNotFound { spec: spec.into() }
    }

    /// Create a release fetch error with status and body
    pub fn release_fetch(status: u16, body: impl Into<String>) -> Self {
        Self::ReleaseFetch {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a download error with URL context
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a scan execution error from trimmed stderr text
    pub fn scan_execution(stderr: impl Into<String>) -> Self {
        Self::ScanExecution {
            stderr: stderr.into(),
        }
    }

    /// Create a missing scan result error for an output format
    pub fn scan_result_missing(format: impl Into<String>) -> Self {
        Self::ScanResultMissing {
            format: format.into(),
        }
    }

    /// Create a report parse error
    pub fn report_parse(message: impl Into<String>) -> Self {
        Self::ReportParse {
            message: message.into(),
        }
    }

    /// Create a process execution error
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: "io".to_string(),
        }
    }
}

/// Result type for hullscan operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message() {
        let err = Error::configuration("bad threshold");
        assert_eq!(err.to_string(), "Configuration error: bad threshold");
    }

    #[test]
    fn release_fetch_carries_status_and_body() {
        let err = Error::release_fetch(503, "upstream down");
        assert_eq!(
            err.to_string(),
            "Failed to fetch release index (HTTP 503): upstream down"
        );
    }

    #[test]
    fn scan_result_missing_names_format() {
        let err = Error::scan_result_missing("sarif");
        assert!(err.to_string().contains("sarif"));
    }
}
