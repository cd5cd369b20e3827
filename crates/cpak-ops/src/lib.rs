//! Operations behind the cpak CLI commands.

pub mod ops_build;
pub mod ops_clean;
pub mod ops_fetch;
pub mod ops_lock;
pub mod ops_new;
pub mod ops_run;
pub mod ops_tree;

use cpak_core::config::GlobalConfig;
use cpak_registry::http::{HttpRegistry, DEFAULT_REGISTRY_URL};

/// Open the configured registry: the `[registry].url` override from
/// `~/.cpak/config.toml`, or the default public registry.
pub fn open_registry(config: &GlobalConfig) -> miette::Result<HttpRegistry> {
    let url = config
        .registry
        .url
        .as_deref()
        .unwrap_or(DEFAULT_REGISTRY_URL);
    Ok(HttpRegistry::new(url)?)
}
