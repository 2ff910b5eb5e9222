//! Release registry model.

use serde::Deserialize;

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository publishing the node releases.
pub const DEFAULT_REPOSITORY: &str = "matter-labs/anvil-zksync";

/// Tag that resolves to the newest published release.
pub const LATEST_TAG: &str = "latest";

/// A published release as returned by the registry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Missing and `null` asset lists both deserialize as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable file of a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl ReleaseAsset {
    pub fn new(name: impl Into<String>, browser_download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            browser_download_url: browser_download_url.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReleaseAsset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let assets: Option<Vec<ReleaseAsset>> = Option::deserialize(deserializer)?;
    Ok(assets.unwrap_or_default())
}

/// API URL of a release: `/releases/latest` for [`LATEST_TAG`], otherwise
/// `/releases/tags/<tag>`.
pub fn release_api_url(api_base: &str, repository: &str, tag: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if tag == LATEST_TAG {
        format!("{}/repos/{}/releases/latest", base, repository)
    } else {
        format!("{}/repos/{}/releases/tags/{}", base, repository, tag)
    }
}

/// First asset whose name contains `target`.
pub fn select_asset<'a>(assets: &'a [ReleaseAsset], target: &str) -> Option<&'a ReleaseAsset> {
    assets.iter().find(|asset| asset.name.contains(target))
}
