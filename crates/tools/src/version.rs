//! Version query helpers.
//!
//! The scanner reports its version as line-oriented `Key: value` pairs on
//! stdout; the line keyed exactly `Version` carries the semantic version.

use hullscan_core::{Error, Result};

/// Extract the semantic version from the scanner's `--version` stdout.
///
/// # Errors
///
/// Fails when no `Version:` line is present.
pub fn parse_version(stdout: &str) -> Result<String> {
    for line in stdout.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let value = rest.trim();
        if key == "Version" && !value.is_empty() {
            return Ok(value.to_string());
        }
    }
    Err(Error::process("cannot parse scanner version from output"))
}

/// Whether `version` satisfies a semver `range`.
///
/// A 7-character lowercase hex token is treated as a commit-pinned build
/// and satisfies any range.
#[must_use]
pub fn satisfies(version: &str, range: &str) -> bool {
    if is_commit_token(version) {
        return true;
    }
    let Ok(version) = semver::Version::parse(version) else {
        return false;
    };
    let Ok(req) = semver::VersionReq::parse(range) else {
        return false;
    };
    req.matches(&version)
}

fn is_commit_token(s: &str) -> bool {
    s.len() == 7 && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
