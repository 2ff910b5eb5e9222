//! Trait definitions for provisioning collaborators.
//!
//! These traits keep the network and archive formats out of
//! [`ToolProvisioner`](super::ToolProvisioner) so it can be tested without
//! network access.

use std::future::Future;
use std::path::Path;

use super::error::ProvisionResult;
use super::release::Release;

/// Looks up published releases.
pub trait ReleaseClient: Send + Sync {
    /// Fetch the release for a tag (`latest` resolves to the newest release).
    fn fetch_release(&self, tag: &str) -> impl Future<Output = ProvisionResult<Release>> + Send;
}

/// Downloads release assets.
pub trait ArtifactFetcher: Send + Sync {
    /// Download `url` into the file `dest`.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    fn fetch(&self, url: &str, dest: &Path) -> impl Future<Output = ProvisionResult<u64>> + Send;
}

/// Unpacks downloaded archives.
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive` into `dest_dir`.
    ///
    /// # Returns
    ///
    /// The number of entries extracted.
    fn extract(&self, archive: &Path, dest_dir: &Path) -> ProvisionResult<usize>;
}
