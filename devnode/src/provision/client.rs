//! HTTP implementations of the provisioning traits.

use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::error::{ProvisionError, ProvisionResult};
use super::release::{release_api_url, Release, DEFAULT_REPOSITORY, GITHUB_API_BASE};
use super::traits::{ArtifactFetcher, ReleaseClient};

/// User agent sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("devnode/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding an optional API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Timeout for release metadata requests.
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Timeout for asset downloads.
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

fn build_client(timeout: Duration) -> ProvisionResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProvisionError::HttpClient(e.to_string()))
}

/// GitHub releases API client.
#[derive(Clone)]
pub struct GithubReleaseClient {
    client: reqwest::Client,
    api_base: String,
    repository: String,
    token: Option<String>,
}

impl std::fmt::Debug for GithubReleaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubReleaseClient")
            .field("api_base", &self.api_base)
            .field("repository", &self.repository)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GithubReleaseClient {
    /// Create a client for the default repository without authentication.
    pub fn new() -> ProvisionResult<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))?,
            api_base: GITHUB_API_BASE.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            token: None,
        })
    }

    /// Create a client that authenticates with `GITHUB_TOKEN` when it is set.
    pub fn from_env() -> ProvisionResult<Self> {
        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        Ok(Self::new()?.with_token(token))
    }

    /// Override the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the `owner/name` repository.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    /// Set or clear the bearer token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Repository releases are read from.
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl ReleaseClient for GithubReleaseClient {
    async fn fetch_release(&self, tag: &str) -> ProvisionResult<Release> {
        let url = release_api_url(&self.api_base, &self.repository, tag);
        debug!(url = %url, tag = tag, "Fetching release info");

        let mut request = self.client.get(&url).header("Accept", GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Release request failed");
            ProvisionError::ReleaseRequest {
                tag: tag.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ProvisionError::ReleaseStatus {
                tag: tag.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Release>()
            .await
            .map_err(|e| ProvisionError::ReleaseRequest {
                tag: tag.to_string(),
                reason: format!("invalid release body: {}", e),
            })
    }
}

/// Streams release assets to disk over HTTP(S).
#[derive(Clone)]
pub struct HttpArtifactFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl std::fmt::Debug for HttpArtifactFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpArtifactFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpArtifactFetcher {
    /// Create a fetcher with the default download timeout.
    pub fn new() -> ProvisionResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> ProvisionResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }
}

impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> ProvisionResult<u64> {
        let download_error = |reason: String| ProvisionError::Download {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(download_error(format!("HTTP {}", response.status())));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ProvisionError::io(dest, e))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| download_error(e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| ProvisionError::io(dest, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| ProvisionError::io(dest, e))?;

        debug!(url = url, bytes = written, "Download complete");
        Ok(written)
    }
}
