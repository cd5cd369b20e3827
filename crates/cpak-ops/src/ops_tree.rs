//! Operation: render the resolved dependency tree.

use std::path::Path;

use cpak_core::config::GlobalConfig;
use cpak_core::dependency::PackageId;
use cpak_core::manifest::{Manifest, MANIFEST_NAME};
use cpak_resolver::graph::DependencyGraph;
use cpak_resolver::resolver::Resolver;

/// Resolve (or reuse the fresh lockfile) and render the dependency tree.
pub fn tree(project_root: &Path, max_depth: Option<usize>) -> miette::Result<String> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    let config = GlobalConfig::load().unwrap_or_default();
    let registry = crate::open_registry(&config)?;

    let resolved = Resolver::new(&registry).install_deps(project_root, &manifest)?;

    let root = PackageId::new(
        manifest.package.name.clone(),
        manifest.package.version.clone(),
    );
    let graph = DependencyGraph::from_resolved(root, &resolved, &manifest.requirement_set());
    Ok(graph.render(max_depth))
}
