//! Operation: resolve and download all dependencies.

use std::collections::HashSet;
use std::path::Path;

use cpak_core::config::GlobalConfig;
use cpak_core::dependency::ResolvedDeps;
use cpak_core::manifest::{Manifest, MANIFEST_NAME};
use cpak_registry::cache::PackageCache;
use cpak_registry::http::HttpRegistry;
use cpak_resolver::resolver::{generate_lockfile, Resolver};
use cpak_util::progress::{progress_bar, spinner, status, status_warn};

/// Fetch all dependencies: resolve, download archives into the project
/// cache, prune stale entries, and update the lockfile.
pub fn fetch(project_root: &Path, verbose: bool) -> miette::Result<()> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    let config = GlobalConfig::load().unwrap_or_default();
    let registry = crate::open_registry(&config)?;
    let cache = PackageCache::new(project_root);

    let sp = spinner("Resolving dependencies...");
    let resolved = Resolver::new(&registry).install_deps(project_root, &manifest)?;
    sp.finish_and_clear();

    let (downloaded, up_to_date) = ensure_fetched(&registry, &cache, &resolved, verbose)?;

    // Drop cached packages that left the resolved set.
    let keep: HashSet<(String, String)> = resolved
        .keys()
        .map(|id| (id.name.clone(), id.version.clone()))
        .collect();
    let pruned = cache.prune(&keep);

    generate_lockfile(project_root, &resolved)?;

    let total = resolved.len();
    if downloaded > 0 || pruned > 0 || verbose {
        status(
            "Fetched",
            &format!(
                "{total} dependencies, {downloaded} downloaded, \
                 {up_to_date} up-to-date, {pruned} pruned"
            ),
        );
    } else if total > 0 {
        status("Fetched", &format!("all {total} dependencies up-to-date"));
    }

    Ok(())
}

/// Download and extract every resolved package missing from the cache.
/// Returns `(downloaded, up_to_date)` counts.
pub(crate) fn ensure_fetched(
    registry: &HttpRegistry,
    cache: &PackageCache,
    resolved: &ResolvedDeps,
    verbose: bool,
) -> miette::Result<(u32, u32)> {
    let mut downloaded = 0u32;
    let mut up_to_date = 0u32;

    let pb = progress_bar(resolved.len() as u64, "Downloading");
    for id in resolved.keys() {
        pb.inc(1);
        if cache.has_package(&id.name, &id.version) {
            up_to_date += 1;
            continue;
        }

        match registry.download_archive(&id.name, &id.version)? {
            Some(data) => {
                cache.install(&id.name, &id.version, &data)?;
                downloaded += 1;
                tracing::debug!("installed {id}");
            }
            None => {
                if verbose {
                    status_warn("Warning", &format!("no archive published for {id}"));
                }
            }
        }
    }
    pb.finish_and_clear();

    Ok((downloaded, up_to_date))
}
