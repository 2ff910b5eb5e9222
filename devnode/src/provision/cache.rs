//! On-disk tool cache.
//!
//! Layout follows the hosted-runner tool cache so entries written here are
//! shared with other tooling on the same runner:
//!
//! ```text
//! <root>/<tool>/<version>/<arch>/          extracted files
//! <root>/<tool>/<version>/<arch>.complete  marker, written last
//! ```
//!
//! An entry without its marker is a partial install and is never returned by
//! [`ToolCache::find`]; [`ToolCache::prepare`] wipes it before reuse.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ProvisionError, ProvisionResult};

/// Environment variable naming the runner's tool cache root.
pub const TOOL_CACHE_ENV: &str = "RUNNER_TOOL_CACHE";

const COMPLETE_SUFFIX: &str = "complete";

/// Tool cache rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCache {
    root: PathBuf,
    arch: String,
}

impl ToolCache {
    /// Create a cache at `root` for the host architecture.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            arch: host_arch().to_string(),
        }
    }

    /// Use `RUNNER_TOOL_CACHE`, falling back to the user cache directory.
    pub fn from_env() -> Self {
        let root = std::env::var_os(TOOL_CACHE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_root);
        Self::new(root)
    }

    /// Override the architecture segment of entry paths.
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Directory an entry lives in, whether or not it exists.
    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.version_dir(tool, version).join(&self.arch)
    }

    fn version_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(clean_version(version))
    }

    fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.version_dir(tool, version)
            .join(format!("{}.{}", self.arch, COMPLETE_SUFFIX))
    }

    /// Directory of a completed entry.
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() && self.marker_path(tool, version).is_file() {
            Some(dir)
        } else {
            None
        }
    }

    /// Create an empty entry directory, removing any partial content.
    pub fn prepare(&self, tool: &str, version: &str) -> ProvisionResult<PathBuf> {
        let dir = self.entry_dir(tool, version);
        let marker = self.marker_path(tool, version);

        if marker.exists() {
            fs::remove_file(&marker).map_err(|e| ProvisionError::io(&marker, e))?;
        }
        if dir.exists() {
            tracing::debug!(dir = %dir.display(), "Removing partial cache entry");
            fs::remove_dir_all(&dir).map_err(|e| ProvisionError::io(&dir, e))?;
        }
        fs::create_dir_all(&dir).map_err(|e| ProvisionError::io(&dir, e))?;
        Ok(dir)
    }

    /// Publish an entry written through [`prepare`](Self::prepare).
    pub fn mark_complete(&self, tool: &str, version: &str) -> ProvisionResult<()> {
        let marker = self.marker_path(tool, version);
        fs::write(&marker, b"").map_err(|e| ProvisionError::io(&marker, e))
    }
}

fn default_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("devnode")
        .join("tools")
}

/// Normalize a release tag into a cache version segment.
///
/// Tags that are semver after stripping a leading `v` or `=` are cached
/// under the bare version; anything else (such as `latest`) is used as is,
/// with path separators replaced.
pub fn clean_version(tag: &str) -> String {
    let trimmed = tag.trim();
    let candidate = trimmed.trim_start_matches(['v', '=']);
    match semver::Version::parse(candidate) {
        Ok(version) => version.to_string(),
        Err(_) => trimmed.replace(['/', '\\'], "_"),
    }
}

/// Host architecture in tool cache naming.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "x86",
        "arm" => "arm",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version() {
        assert_eq!(clean_version("v0.6.1"), "0.6.1");
        assert_eq!(clean_version("0.6.1"), "0.6.1");
        assert_eq!(clean_version("=1.2.3-rc.1"), "1.2.3-rc.1");
        assert_eq!(clean_version("latest"), "latest");
        assert_eq!(clean_version("nightly/2024"), "nightly_2024");
    }

    #[test]
    fn test_entry_layout() {
        let cache = ToolCache::new("/cache").with_arch("x64");
        assert_eq!(
            cache.entry_dir("anvil-zksync", "v0.6.1"),
            PathBuf::from("/cache/anvil-zksync/0.6.1/x64")
        );
        assert_eq!(
            cache.marker_path("anvil-zksync", "v0.6.1"),
            PathBuf::from("/cache/anvil-zksync/0.6.1/x64.complete")
        );
    }

    #[test]
    fn test_find_requires_marker() {
        let temp = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(temp.path());

        assert!(cache.find("anvil-zksync", "latest").is_none());

        let dir = cache.prepare("anvil-zksync", "latest").unwrap();
        assert!(dir.is_dir());
        assert!(cache.find("anvil-zksync", "latest").is_none());

        cache.mark_complete("anvil-zksync", "latest").unwrap();
        assert_eq!(cache.find("anvil-zksync", "latest"), Some(dir));
    }

    #[test]
    fn test_prepare_wipes_partial_entry() {
        let temp = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(temp.path());

        let dir = cache.prepare("anvil-zksync", "v1.0.0").unwrap();
        fs::write(dir.join("stale"), b"x").unwrap();
        cache.mark_complete("anvil-zksync", "v1.0.0").unwrap();

        let dir = cache.prepare("anvil-zksync", "v1.0.0").unwrap();
        assert!(!dir.join("stale").exists());
        assert!(cache.find("anvil-zksync", "v1.0.0").is_none());
    }

    #[test]
    fn test_versions_are_separate_entries() {
        let temp = tempfile::tempdir().unwrap();
        let cache = ToolCache::new(temp.path());

        cache.prepare("anvil-zksync", "v1.0.0").unwrap();
        cache.mark_complete("anvil-zksync", "v1.0.0").unwrap();

        assert!(cache.find("anvil-zksync", "1.0.0").is_some());
        assert!(cache.find("anvil-zksync", "v1.0.1").is_none());
        assert!(cache.find("other-tool", "v1.0.0").is_none());
    }

    #[test]
    fn test_host_arch_is_not_empty() {
        assert!(!host_arch().is_empty());
    }
}
