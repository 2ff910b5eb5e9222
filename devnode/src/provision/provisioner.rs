//! Download-or-reuse orchestration for the node binary.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::cache::ToolCache;
use super::client::{GithubReleaseClient, HttpArtifactFetcher};
use super::error::{ProvisionError, ProvisionResult};
use super::extractor::TarGzExtractor;
use super::release::select_asset;
use super::search_path::add_path;
use super::traits::{ArchiveExtractor, ArtifactFetcher, ReleaseClient};
use crate::TOOL_NAME;

/// Provisioner wired to GitHub releases and `.tar.gz` assets.
pub type GithubToolProvisioner =
    ToolProvisioner<GithubReleaseClient, HttpArtifactFetcher, TarGzExtractor>;

/// Ensures a release of the node binary is present locally.
///
/// A cached entry is reused without touching the network. Otherwise the
/// release is looked up, the asset matching the platform target is
/// downloaded and extracted into the cache, and the entry is published.
/// Either way the binary is made executable and, unless disabled, its
/// directory is added to the search path.
pub struct ToolProvisioner<R, F, E> {
    releases: R,
    fetcher: F,
    extractor: E,
    cache: ToolCache,
    tool: String,
    register_path: bool,
}

impl GithubToolProvisioner {
    /// Build the production provisioner from the environment.
    pub fn from_env() -> ProvisionResult<Self> {
        Ok(Self::new(
            GithubReleaseClient::from_env()?,
            HttpArtifactFetcher::new()?,
            TarGzExtractor::new(),
            ToolCache::from_env(),
        ))
    }
}

impl<R, F, E> ToolProvisioner<R, F, E>
where
    R: ReleaseClient,
    F: ArtifactFetcher,
    E: ArchiveExtractor,
{
    pub fn new(releases: R, fetcher: F, extractor: E, cache: ToolCache) -> Self {
        Self {
            releases,
            fetcher,
            extractor,
            cache,
            tool: TOOL_NAME.to_string(),
            register_path: true,
        }
    }

    /// Enable or disable search path registration.
    pub fn with_path_registration(mut self, enabled: bool) -> Self {
        self.register_path = enabled;
        self
    }

    pub fn cache(&self) -> &ToolCache {
        &self.cache
    }

    /// Path of the executable inside a provisioned directory.
    pub fn executable_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}", self.tool, std::env::consts::EXE_SUFFIX))
    }

    /// Ensure `tag` is available for `target` and return its directory.
    pub async fn provision(&self, tag: &str, target: &str) -> ProvisionResult<PathBuf> {
        let dir = match self.cache.find(&self.tool, tag) {
            Some(dir) => {
                info!("Found cached {} at {}", self.tool, dir.display());
                dir
            }
            None => self.install(tag, target).await?,
        };

        self.make_executable(&dir)?;
        if self.register_path {
            add_path(&dir)?;
        }

        Ok(dir)
    }

    async fn install(&self, tag: &str, target: &str) -> ProvisionResult<PathBuf> {
        let release = self.releases.fetch_release(tag).await?;
        if release.assets.is_empty() {
            return Err(ProvisionError::NoAssets {
                tag: tag.to_string(),
            });
        }

        let asset = select_asset(&release.assets, target).ok_or_else(|| {
            ProvisionError::AssetNotFound {
                target: target.to_string(),
                tag: tag.to_string(),
            }
        })?;

        info!(
            "Downloading {} from {}",
            self.tool, asset.browser_download_url
        );

        let staging = tempfile::tempdir().map_err(|e| ProvisionError::io(std::env::temp_dir(), e))?;
        let archive = staging.path().join(&asset.name);
        let bytes = self
            .fetcher
            .fetch(&asset.browser_download_url, &archive)
            .await?;
        debug!(asset = %asset.name, bytes = bytes, "Asset downloaded");

        let dir = self.cache.prepare(&self.tool, tag)?;
        self.extractor.extract(&archive, &dir)?;
        self.cache.mark_complete(&self.tool, tag)?;

        info!("Cached {} {} at {}", self.tool, tag, dir.display());
        Ok(dir)
    }

    fn make_executable(&self, dir: &Path) -> ProvisionResult<()> {
        let binary = self.executable_path(dir);
        if !binary.is_file() {
            return Err(ProvisionError::MissingBinary { path: binary });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata =
                std::fs::metadata(&binary).map_err(|e| ProvisionError::io(&binary, e))?;
            let mut permissions = metadata.permissions();
            permissions.set_mode(permissions.mode() | 0o755);
            std::fs::set_permissions(&binary, permissions)
                .map_err(|e| ProvisionError::io(&binary, e))?;
        }

        Ok(())
    }
}
