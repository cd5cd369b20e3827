//! Resolution orchestration: gather → CNF → SAT → resolved set, plus the
//! lockfile-aware entry points the build pipeline calls.

use std::collections::BTreeMap;
use std::path::Path;

use cpak_core::dependency::ResolvedDeps;
use cpak_core::lockfile;
use cpak_core::manifest::Manifest;
use cpak_registry::Registry;

use crate::cnf;
use crate::gather::{ActivatedNode, Gatherer};
use crate::sat;

/// Dependency resolver over an injected registry.
///
/// The registry is the only collaborator; there is no ambient state, so a
/// fixture registry drops in for tests.
pub struct Resolver<'a> {
    registry: &'a dyn Registry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a dyn Registry) -> Self {
        Self { registry }
    }

    /// Resolve a requirement set into a transitively closed package set with
    /// one version per name.
    pub fn resolve(&self, requirements: &BTreeMap<String, String>) -> miette::Result<ResolvedDeps> {
        if requirements.is_empty() {
            return Ok(ResolvedDeps::new());
        }

        let activated = Gatherer::new(self.registry).gather_all(requirements)?;
        let clauses = cnf::create_cnf(&activated);
        log_clauses(&activated, &clauses);

        let assignments = sat::solve(&clauses, activated.len())?;
        tracing::debug!(?assignments, "SAT assignment");

        let mut resolved = ResolvedDeps::new();
        for literal in assignments {
            if literal > 0 {
                let node = &activated[(literal - 1) as usize];
                resolved.insert(node.package.clone(), node.deps.clone());
            }
        }
        Ok(resolved)
    }

    /// Resolve the manifest's dependencies, reusing the lockfile when it is
    /// fresh. Idempotent while nothing changes on disk.
    ///
    /// Inner dependency versions decoded from a lockfile are empty strings;
    /// consumers cross-reference by name among the keys.
    pub fn install_deps(
        &self,
        project_root: &Path,
        manifest: &Manifest,
    ) -> miette::Result<ResolvedDeps> {
        if !lockfile::is_outdated(project_root) {
            if let Some(locked) = lockfile::read(project_root)? {
                tracing::debug!("lockfile fresh, skipping resolution");
                return Ok(locked);
            }
        }
        self.resolve(&manifest.requirement_set())
    }
}

/// Persist a resolved set, writing only when the lockfile is outdated.
pub fn generate_lockfile(project_root: &Path, deps: &ResolvedDeps) -> miette::Result<()> {
    lockfile::generate(project_root, deps)
}

fn log_clauses(activated: &[ActivatedNode], clauses: &[Vec<i32>]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    for clause in clauses {
        let rendered: Vec<String> = clause
            .iter()
            .map(|&literal| {
                let node = &activated[(literal.unsigned_abs() - 1) as usize];
                format!("{}: {literal}", node.package)
            })
            .collect();
        tracing::debug!("clause {}", rendered.join(", "));
    }
}
