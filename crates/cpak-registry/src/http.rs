//! HTTP/JSON registry client.
//!
//! The registry speaks a small JSON API:
//! - `GET {base}/packages/{name}/versions` → `{"versions": ["1.0.0", ...]}`
//! - `GET {base}/packages/{name}/{version}/deps` → `{"dependencies": {"fmt": ">=10.0.0 and <11.0.0"}}`
//! - `GET {base}/packages/{name}/{version}/download` → package tarball, with
//!   a `.sha256` sidecar next to it.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use cpak_util::errors::CpakError;

use crate::client::Registry;
use crate::download;

/// Default package registry API base URL.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.cpak.dev/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A registry reached over HTTP. The resolver core is synchronous, so the
/// blocking client is used at this boundary.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct VersionsResponse {
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DepsResponse {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

impl HttpRegistry {
    /// Create a client for the registry at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, CpakError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cpak/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CpakError::RegistryUnavailable {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL listing all published versions of a package.
    pub fn versions_url(&self, name: &str) -> String {
        format!("{}/packages/{name}/versions", self.base_url)
    }

    /// URL of one release's direct requirements.
    pub fn deps_url(&self, name: &str, version: &str) -> String {
        format!("{}/packages/{name}/{version}/deps", self.base_url)
    }

    /// URL of one release's source tarball.
    pub fn archive_url(&self, name: &str, version: &str) -> String {
        format!("{}/packages/{name}/{version}/download", self.base_url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        name: &str,
    ) -> Result<T, CpakError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| CpakError::RegistryUnavailable {
                message: format!("Request to {url} failed: {e}"),
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CpakError::UnknownPackage {
                name: name.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(CpakError::RegistryUnavailable {
                message: format!("HTTP {} fetching {url}", resp.status()),
            });
        }

        resp.json().map_err(|e| CpakError::RegistryUnavailable {
            message: format!("Malformed response from {url}: {e}"),
        })
    }

    /// Download one release's tarball, verified against its `.sha256`
    /// sidecar when the registry publishes one. `None` when the registry has
    /// no archive for this release.
    pub fn download_archive(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<Vec<u8>>, CpakError> {
        let url = self.archive_url(name, version);
        let Some(data) = download::download_bytes(&self.client, &url)? else {
            return Ok(None);
        };
        download::verify_checksum(&self.client, &url, &data)?;
        Ok(Some(data))
    }
}

impl Registry for HttpRegistry {
    fn versions(&self, name: &str) -> Result<Vec<String>, CpakError> {
        let url = self.versions_url(name);
        let resp: VersionsResponse = self.get_json(&url, name)?;
        Ok(resp.versions)
    }

    fn deps(&self, name: &str, version: &str) -> Result<BTreeMap<String, String>, CpakError> {
        let url = self.deps_url(name, version);
        let resp: DepsResponse = self.get_json(&url, name)?;
        Ok(resp.dependencies)
    }
}
