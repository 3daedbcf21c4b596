//! Scanner binary acquisition.
//!
//! `install` turns a version specifier into a ready-to-run executable path:
//! resolve the release, consult the cache, and on a miss download the
//! platform archive, extract it, and register the directory in the cache.
//! Every download/extraction failure is fatal and unretried.

use crate::cache::ToolCache;
use crate::release::ReleaseResolver;
use flate2::read::GzDecoder;
use hullscan_core::{Error, Os, Platform, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};

/// Name of the scanner executable and cache key.
pub const TOOL_NAME: &str = "trivy";

/// Default release index queried for version resolution.
pub const DEFAULT_INDEX_URL: &str = "https://github.com/aquasecurity/trivy/releases";

/// Default base URL release archives are downloaded from.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com/aquasecurity/trivy/releases/download";

/// Acquires and caches the scanner binary.
pub struct Installer<C> {
    resolver: ReleaseResolver,
    cache: C,
    platform: Platform,
    client: reqwest::Client,
    download_base: String,
}

impl<C: ToolCache> Installer<C> {
    /// Create an installer for the given platform.
    #[must_use]
    pub fn new(resolver: ReleaseResolver, cache: C, platform: Platform) -> Self {
        Self {
            resolver,
            cache,
            platform,
            client: crate::http_client(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
        }
    }

    /// Override the download base URL.
    #[must_use]
    pub fn with_download_base(mut self, base: impl Into<String>) -> Self {
        self.download_base = base.into();
        self
    }

    /// Resolve a version specifier and return the path to the scanner
    /// executable, downloading and caching the release on a cache miss.
    ///
    /// Repeated calls with the same resolved version return the same path
    /// without network access.
    ///
    /// # Errors
    ///
    /// `ReleaseNotFound`/`ReleaseFetch` from resolution, `InvalidVersion`
    /// for a malformed tag, `Download`/`Extraction` on acquisition failure.
    pub async fn install(&self, version_spec: &str) -> Result<PathBuf> {
        let release = self.resolver.resolve(version_spec).await?;
        debug!(tag = %release.tag_name, "Release found");

        let version = release
            .tag_name
            .trim_start_matches('v')
            .trim_end_matches('v')
            .to_string();

        let tool_dir = match self.cache.find(TOOL_NAME, &version) {
            Some(dir) => {
                debug!(%version, dir = %dir.display(), "Scanner already cached");
                dir
            }
            None => {
                if semver::Version::parse(&version).is_err() {
                    return Err(Error::invalid_version(version));
                }
                self.download(&version).await?
            }
        };

        let exe_path = tool_dir.join(executable_name(self.platform.os));
        debug!(exe = %exe_path.display(), "Scanner executable path");
        set_executable(&exe_path)?;
        Ok(exe_path)
    }

    /// Archive filename for a version on this installer's platform.
    #[must_use]
    pub fn archive_filename(&self, version: &str) -> String {
        format!(
            "{}_{}_{}-{}{}",
            TOOL_NAME,
            version,
            self.platform.os.archive_label(),
            self.platform.arch.archive_label(),
            self.platform.archive_ext()
        )
    }

    async fn download(&self, version: &str) -> Result<PathBuf> {
        let url = format!(
            "{}/v{}/{}",
            self.download_base.trim_end_matches('/'),
            version,
            self.archive_filename(version)
        );
        info!(%url, "Downloading scanner");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::download(&url, e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::download(&url, format!("HTTP {}", response.status())));
        }
        let data = response
            .bytes()
            .await
            .map_err(|e| Error::download(&url, e.to_string()))?;

        // Extract to a staging directory first; only a complete extraction
        // is registered in the cache.
        let staging = tempfile::tempdir()
            .map_err(|e| Error::io(e, None, "create staging dir"))?
            .keep();
        let extract_result = match self.platform.os {
            Os::Windows => extract_zip(&data, &staging),
            Os::Darwin | Os::Linux => extract_tar_gz(&data, &staging),
        };
        if let Err(e) = extract_result {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(e);
        }
        debug!(dir = %staging.display(), "Extracted scanner archive");

        let cached = self.cache.store(TOOL_NAME, version, &staging)?;
        // store may have copied instead of renamed; drop the staging copy.
        if staging.exists() && staging != cached {
            let _ = std::fs::remove_dir_all(&staging);
        }
        debug!(dir = %cached.display(), "Cached scanner");
        Ok(cached)
    }
}

/// Executable filename within an installed release directory.
#[must_use]
pub fn executable_name(os: Os) -> &'static str {
    match os {
        Os::Windows => "trivy.exe",
        Os::Darwin | Os::Linux => "trivy",
    }
}

fn extract_tar_gz(data: &[u8], dest: &Path) -> Result<()> {
    let decoder = GzDecoder::new(Cursor::new(data));
    let mut archive = Archive::new(decoder);
    archive
        .unpack(dest)
        .map_err(|e| Error::extraction(format!("failed to unpack tar.gz: {e}")))
}

fn extract_zip(data: &[u8], dest: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::extraction(format!("failed to open zip: {e}")))?;
    archive
        .extract(dest)
        .map_err(|e| Error::extraction(format!("failed to unpack zip: {e}")))
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)
        .map_err(|e| Error::io(e, Some(path.to_path_buf()), "stat executable"))?
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
        .map_err(|e| Error::io(e, Some(path.to_path_buf()), "fix executable perms"))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
