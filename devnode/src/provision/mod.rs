//! Tool provisioning: locate, download, and cache the node binary.
//!
//! # Architecture
//!
//! [`ToolProvisioner`] is generic over three seams so it can be tested
//! without network access:
//!
//! - [`ReleaseClient`] - looks up a release and its assets
//! - [`ArtifactFetcher`] - downloads an asset to disk
//! - [`ArchiveExtractor`] - unpacks a downloaded asset
//!
//! Production wiring ([`GithubToolProvisioner`]) uses the GitHub releases API,
//! streaming `reqwest` downloads, and `.tar.gz` extraction. Extracted tools
//! live in a [`ToolCache`] keyed by tool name and release tag.

mod cache;
mod client;
mod error;
mod extractor;
mod provisioner;
mod release;
mod search_path;
mod traits;

pub use cache::{clean_version, host_arch, ToolCache, TOOL_CACHE_ENV};
pub use client::{GithubReleaseClient, HttpArtifactFetcher, TOKEN_ENV, USER_AGENT};
pub use error::{ProvisionError, ProvisionResult};
pub use extractor::TarGzExtractor;
pub use provisioner::{GithubToolProvisioner, ToolProvisioner};
pub use release::{
    release_api_url, select_asset, Release, ReleaseAsset, DEFAULT_REPOSITORY, GITHUB_API_BASE,
    LATEST_TAG,
};
pub use search_path::{add_path, append_path_file, GITHUB_PATH_ENV};
pub use traits::{ArchiveExtractor, ArtifactFetcher, ReleaseClient};

#[cfg(test)]
pub(crate) use provisioner::tests;
