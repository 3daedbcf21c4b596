//! Scanner release resolution, binary acquisition and caching.
//!
//! The install flow resolves a version specifier against the release index,
//! consults a version-keyed binary cache, and on a miss downloads and
//! extracts the platform archive:
//!
//! ```ignore
//! let resolver = ReleaseResolver::new(http_client(), DEFAULT_INDEX_URL);
//! let cache = DirToolCache::new(cache_dir);
//! let installer = Installer::new(resolver, cache, Platform::current());
//! let bin = installer.install("latest").await?;
//! ```

pub mod cache;
pub mod install;
pub mod release;
pub mod version;

pub use cache::{DirToolCache, MemoryToolCache, ToolCache};
pub use install::{DEFAULT_DOWNLOAD_BASE, DEFAULT_INDEX_URL, Installer, TOOL_NAME};
pub use release::{Release, ReleaseResolver};

/// Build the HTTP client used for index queries and downloads.
///
/// # Panics
///
/// `reqwest::Client::builder().build()` only fails on TLS backend
/// initialization problems, which indicate a broken environment.
#[must_use]
#[allow(clippy::expect_used)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("hullscan")
        .build()
        .expect("Failed to create HTTP client - TLS backend initialization failed")
}
