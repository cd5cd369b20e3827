//! Operation: resolve all dependencies and regenerate Cpak.lock.

use std::path::Path;

use cpak_core::config::GlobalConfig;
use cpak_core::lockfile;
use cpak_core::manifest::{Manifest, MANIFEST_NAME};
use cpak_resolver::resolver::Resolver;
use cpak_util::progress::{spinner, status};

/// Force re-resolve all dependencies and regenerate `Cpak.lock`, ignoring
/// any existing lockfile.
pub fn lock(project_root: &Path) -> miette::Result<()> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    let config = GlobalConfig::load().unwrap_or_default();
    let registry = crate::open_registry(&config)?;

    let sp = spinner("Resolving dependencies...");
    let resolved = Resolver::new(&registry).resolve(&manifest.requirement_set())?;
    sp.finish_and_clear();

    lockfile::overwrite(project_root, &resolved)?;
    status("Resolved", &format!("{} dependencies", resolved.len()));

    Ok(())
}
