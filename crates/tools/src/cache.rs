//! Version-keyed binary cache.
//!
//! The cache maps (tool name, resolved version) to a local installation
//! directory. It is append-only: entries are added, never overwritten or
//! evicted. `store` only makes a fully extracted directory visible, so a
//! failed acquisition never leaves a partial entry behind that a later
//! `find` would return as a false hit.

use hullscan_core::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Key-value store for installed tool directories.
pub trait ToolCache: Send + Sync {
    /// Look up the installation directory for (tool, version).
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf>;

    /// Register a fully populated directory under (tool, version) and
    /// return the directory the entry now lives at.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be moved into the cache.
    fn store(&self, tool: &str, version: &str, source_dir: &Path) -> Result<PathBuf>;
}

/// Filesystem cache rooted at a directory, laid out as `<root>/<tool>/<version>/`.
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
}

impl DirToolCache {
    /// Create a cache rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }
}

impl ToolCache for DirToolCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        dir.is_dir().then_some(dir)
    }

    fn store(&self, tool: &str, version: &str, source_dir: &Path) -> Result<PathBuf> {
        let dest = self.entry_dir(tool, version);
        if dest.exists() {
            // Append-only: a concurrent-free design means an existing entry
            // is already complete. Keep it.
            return Ok(dest);
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(e, Some(parent.to_path_buf()), "create cache dir"))?;
        }

        // Rename makes the entry visible atomically; fall back to a copy
        // when source and cache live on different filesystems.
        if std::fs::rename(source_dir, &dest).is_err() {
            copy_dir_recursive(source_dir, &dest)?;
        }
        debug!(tool, version, dest = %dest.display(), "Cached tool directory");
        Ok(dest)
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)
        .map_err(|e| Error::io(e, Some(dest.to_path_buf()), "create dir"))?;
    for entry in
        std::fs::read_dir(src).map_err(|e| Error::io(e, Some(src.to_path_buf()), "read dir"))?
    {
        let entry = entry.map_err(|e| Error::io(e, Some(src.to_path_buf()), "read dir entry"))?;
        let target = dest.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(e, Some(entry.path()), "stat"))?;
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)
                .map_err(|e| Error::io(e, Some(entry.path()), "copy"))?;
        }
    }
    Ok(())
}

/// In-memory cache for tests.
#[derive(Debug, Default)]
pub struct MemoryToolCache {
    entries: Mutex<HashMap<(String, String), PathBuf>>,
}

impl MemoryToolCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolCache for MemoryToolCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        self.entries
            .lock()
            .ok()?
            .get(&(tool.to_string(), version.to_string()))
            .cloned()
    }

    fn store(&self, tool: &str, version: &str, source_dir: &Path) -> Result<PathBuf> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::process("memory cache lock poisoned"))?;
        entries
            .entry((tool.to_string(), version.to_string()))
            .or_insert_with(|| source_dir.to_path_buf());
        Ok(source_dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_cache_miss_then_hit() {
        let root = tempfile::tempdir().unwrap();
        let cache = DirToolCache::new(root.path());
        assert!(cache.find("trivy", "0.19.2").is_none());

        let staging = tempfile::tempdir().unwrap();
        std::fs::write(staging.path().join("trivy"), b"#!/bin/sh\n").unwrap();
        let stored = cache.store("trivy", "0.19.2", staging.path()).unwrap();

        assert_eq!(cache.find("trivy", "0.19.2"), Some(stored.clone()));
        assert!(stored.join("trivy").is_file());
    }

    #[test]
    fn dir_cache_store_is_append_only() {
        let root = tempfile::tempdir().unwrap();
        let cache = DirToolCache::new(root.path());

        let first = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("trivy"), b"first").unwrap();
        let stored = cache.store("trivy", "0.19.2", first.path()).unwrap();

        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("trivy"), b"second").unwrap();
        let stored_again = cache.store("trivy", "0.19.2", second.path()).unwrap();

        assert_eq!(stored, stored_again);
        assert_eq!(std::fs::read(stored.join("trivy")).unwrap(), b"first");
    }

    #[test]
    fn versions_are_distinct_entries() {
        let root = tempfile::tempdir().unwrap();
        let cache = DirToolCache::new(root.path());

        let staging = tempfile::tempdir().unwrap();
        std::fs::write(staging.path().join("trivy"), b"x").unwrap();
        cache.store("trivy", "0.19.2", staging.path()).unwrap();

        assert!(cache.find("trivy", "0.19.2").is_some());
        assert!(cache.find("trivy", "0.20.0").is_none());
        assert!(cache.find("grype", "0.19.2").is_none());
    }

    #[test]
    fn memory_cache_round_trip() {
        let cache = MemoryToolCache::new();
        assert!(cache.find("trivy", "0.19.2").is_none());
        cache
            .store("trivy", "0.19.2", Path::new("/opt/trivy/0.19.2"))
            .unwrap();
        assert_eq!(
            cache.find("trivy", "0.19.2"),
            Some(PathBuf::from("/opt/trivy/0.19.2"))
        );
    }
}
