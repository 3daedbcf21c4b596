//! Release index resolution.
//!
//! Resolves a version specifier (`latest`, a tag, or a commit-like token)
//! to a concrete release via a remote JSON index. A single fetch attempt is
//! authoritative; resolution failures abort the whole run.

use hullscan_core::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Release metadata from the index.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

/// Resolves version specifiers against a remote release index.
///
/// The index responds with either a single release object (live upstream
/// release list) or a mapping from version string to release object
/// (pinned/mirrored list); both shapes are accepted.
pub struct ReleaseResolver {
    client: reqwest::Client,
    index_url: String,
}

impl ReleaseResolver {
    /// Create a resolver for the given index URL.
    #[must_use]
    pub fn new(client: reqwest::Client, index_url: impl Into<String>) -> Self {
        Self {
            client,
            index_url: index_url.into(),
        }
    }

    /// Resolve a version specifier to a concrete release.
    ///
    /// # Errors
    ///
    /// `ReleaseNotFound` when the index has no entry for the specifier,
    /// `ReleaseFetch` on transport or non-2xx failure. No retries.
    pub async fn resolve(&self, spec: &str) -> Result<Release> {
        let url = format!("{}/{}", self.index_url.trim_end_matches('/'), spec);
        debug!(%url, "Fetching release index entry");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::release_fetch(0, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::release_not_found(spec));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::release_fetch(status.as_u16(), body));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::release_fetch(status.as_u16(), e.to_string()))?;

        parse_release_entry(&value, spec)
    }
}

/// Pull the release for `spec` out of an index response.
fn parse_release_entry(value: &serde_json::Value, spec: &str) -> Result<Release> {
    if value.get("tag_name").is_some() {
        return Release::deserialize(value)
            .map_err(|e| Error::release_fetch(200, format!("malformed release object: {e}")));
    }

    // Pinned/mirror list: a map from version string to release object.
    if let Some(entry) = value.get(spec) {
        return Release::deserialize(entry)
            .map_err(|e| Error::release_fetch(200, format!("malformed release entry: {e}")));
    }

    Err(Error::release_not_found(spec))
}
