//! Archive downloading with retries and checksum verification.

use std::time::Duration;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use cpak_util::errors::CpakError;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Download raw bytes from a URL, retrying transient failures.
///
/// Returns `Ok(None)` for 404 (the registry has nothing at this URL).
/// Server errors and connection failures retry up to [`MAX_RETRIES`] times
/// before surfacing as `RegistryUnavailable`.
pub fn download_bytes(client: &Client, url: &str) -> Result<Option<Vec<u8>>, CpakError> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            std::thread::sleep(RETRY_DELAY * attempt);
        }

        match client.get(url).send() {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(CpakError::RegistryUnavailable {
                        message: format!("HTTP {status} fetching {url}"),
                    });
                }

                let bytes = resp.bytes().map_err(|e| CpakError::RegistryUnavailable {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(CpakError::RegistryUnavailable {
                    message: format!("Request to {url} failed: {e}"),
                });
            }
        }
    }

    Err(CpakError::RegistryUnavailable {
        message: format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}"),
    })
}

/// Download a small text file (checksum sidecar).
pub fn download_text(client: &Client, url: &str) -> Result<Option<String>, CpakError> {
    match download_bytes(client, url)? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}

/// Verify downloaded data against the `.sha256` sidecar next to `file_url`.
///
/// Registries without sidecars get a warning, not a failure.
pub fn verify_checksum(client: &Client, file_url: &str, data: &[u8]) -> Result<(), CpakError> {
    let sidecar_url = format!("{file_url}.sha256");
    let Some(expected) = download_text(client, &sidecar_url)? else {
        tracing::warn!("No checksum sidecar found for {file_url}");
        return Ok(());
    };

    let expected = extract_hash(&expected);
    let actual = archive_sha256(data);
    if actual.eq_ignore_ascii_case(&expected) {
        tracing::debug!("SHA-256 ok for {file_url}");
        Ok(())
    } else {
        Err(CpakError::Generic {
            message: format!(
                "SHA-256 mismatch for {file_url}: expected {expected}, got {actual}"
            ),
        })
    }
}

/// Extract the hex hash from a checksum file.
///
/// Sidecars may contain just the hash, or `hash  filename`.
fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

/// Lowercase hex SHA-256 of a downloaded archive, matching the format the
/// registry publishes in its sidecars.
fn archive_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
