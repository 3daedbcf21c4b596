//! Generic external-process execution.
//!
//! Runs a binary, captures stdout/stderr and the exit code, and leaves
//! interpretation of non-zero exits entirely to callers.

use hullscan_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

/// Captured output of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Runs external processes with captured output.
///
/// `run` never fails on a non-zero exit code; only spawn-level failures
/// surface as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run `bin` with `args`, inheriting the parent environment plus
    /// `env_overrides`. With `silent` unset the captured stdout is echoed
    /// through tracing; capture behavior is unaffected either way.
    ///
    /// # Errors
    ///
    /// Returns `Error::Process` when the process cannot be spawned.
    pub async fn run(
        &self,
        bin: &Path,
        args: &[String],
        env_overrides: &HashMap<String, String>,
        silent: bool,
    ) -> Result<ProcessOutput> {
        let output = Command::new(bin)
            .args(args)
            .envs(env_overrides)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::process(format!("failed to run {}: {e}", bin.display())))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if !silent {
            for line in stdout.lines() {
                info!("{line}");
            }
        }

        Ok(ProcessOutput {
            stdout,
            stderr,
            exit_code,
        })
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let runner = ProcessRunner::new();
        let out = runner
            .run(
                &PathBuf::from("/bin/sh"),
                &["-c".to_string(), "echo hello".to_string()],
                &HashMap::new(),
                true,
            )
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.exit_code, 0);
    }

    #[tokio::test]
    async fn non_zero_exit_is_not_an_error() {
        let runner = ProcessRunner::new();
        let out = runner
            .run(
                &PathBuf::from("/bin/sh"),
                &["-c".to_string(), "echo oops >&2; exit 3".to_string()],
                &HashMap::new(),
                true,
            )
            .await
            .unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn env_overrides_reach_the_child() {
        let runner = ProcessRunner::new();
        let mut env = HashMap::new();
        env.insert("HULLSCAN_TEST_TOKEN".to_string(), "sekrit".to_string());
        let out = runner
            .run(
                &PathBuf::from("/bin/sh"),
                &["-c".to_string(), "echo $HULLSCAN_TEST_TOKEN".to_string()],
                &env,
                true,
            )
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "sekrit");
    }

    #[tokio::test]
    async fn missing_binary_is_a_process_error() {
        let runner = ProcessRunner::new();
        let err = runner
            .run(
                &PathBuf::from("/nonexistent/binary"),
                &[],
                &HashMap::new(),
                true,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Process { .. }));
    }
}
