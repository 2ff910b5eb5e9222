//! Error types for tool provisioning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while provisioning the node binary.
///
/// None of these are retried. A tool that was fully extracted before a later
/// step failed stays in the cache.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The release registry answered with a non-success status.
    #[error("Failed to fetch release info for tag {tag}. HTTP Status: {status}")]
    ReleaseStatus { tag: String, status: u16 },

    /// The release registry could not be reached or returned an unreadable body.
    #[error("Failed to fetch release info for tag {tag}: {reason}")]
    ReleaseRequest { tag: String, reason: String },

    /// The release exists but publishes no assets.
    #[error("No release assets found for tag {tag}.")]
    NoAssets { tag: String },

    /// No asset name contains the requested platform target.
    #[error("Asset with architecture {target} not found for tag {tag}.")]
    AssetNotFound { target: String, tag: String },

    /// Downloading the release asset failed.
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    /// The downloaded archive could not be unpacked.
    #[error("Failed to extract {}: {reason}", archive.display())]
    Extract { archive: PathBuf, reason: String },

    /// The extracted directory does not contain the expected executable.
    #[error("Executable not found at {}", path.display())]
    MissingBinary { path: PathBuf },

    /// Filesystem error while managing the tool cache.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

impl ProvisionError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from looking up the release.
    pub fn is_release_lookup(&self) -> bool {
        matches!(
            self,
            Self::ReleaseStatus { .. } | Self::ReleaseRequest { .. } | Self::NoAssets { .. }
        )
    }
}

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
