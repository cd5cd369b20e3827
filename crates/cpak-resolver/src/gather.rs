//! Transitive dependency gathering.
//!
//! Walks the manifest's requirement set over the registry, expanding every
//! interval into all of its satisfying versions and recording each concrete
//! `(name, version)` exactly once, together with its direct children. The
//! output order is the discovery order; the CNF builder turns each index
//! into a SAT variable, so the walk must be deterministic given the same
//! registry responses.

use std::collections::{BTreeMap, HashSet};

use semver::Version;

use cpak_core::dependency::{PackageId, Requirement};
use cpak_registry::Registry;
use cpak_util::errors::CpakError;

use crate::cache::IntervalCache;
use crate::interval::Interval;

/// A concrete package discovered by the gatherer, with its direct children
/// after interval expansion. `None` marks a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedNode {
    pub package: PackageId,
    pub deps: Option<Vec<PackageId>>,
}

/// Walks requirements into an ordered sequence of [`ActivatedNode`]s.
pub struct Gatherer<'a> {
    registry: &'a dyn Registry,
    cache: IntervalCache,
    activated: Vec<ActivatedNode>,
    visited: HashSet<PackageId>,
}

impl<'a> Gatherer<'a> {
    pub fn new(registry: &'a dyn Registry) -> Self {
        Self {
            registry,
            cache: IntervalCache::new(),
            activated: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Gather the full candidate universe for a top-level requirement set.
    ///
    /// Fatal on `NoCompatibleVersion`, `UnknownPackage` and
    /// `RegistryUnavailable`; there is no partial result.
    pub fn gather_all(
        mut self,
        requirements: &BTreeMap<String, String>,
    ) -> miette::Result<Vec<ActivatedNode>> {
        for (name, req) in requirements {
            let requirement = Requirement::new(name.clone(), req.clone());
            // Already expanded through some earlier subtree: the versions it
            // produced have been gathered too.
            if self.cache.lookup(&requirement).is_some() {
                continue;
            }
            let versions = self.versions_satisfying(&requirement)?;
            for version in versions {
                self.gather(PackageId::new(name.clone(), version))?;
            }
        }
        Ok(self.activated)
    }

    /// Expand one requirement into its satisfying versions via the cache.
    fn versions_satisfying(&mut self, requirement: &Requirement) -> Result<Vec<String>, CpakError> {
        if let Some(hit) = self.cache.lookup(requirement) {
            return Ok(hit.to_vec());
        }

        let interval = Interval::parse(&requirement.req)?;
        let mut satisfied = Vec::new();
        for candidate in self.registry.versions(&requirement.name)? {
            let version = Version::parse(&candidate).map_err(|e| CpakError::Generic {
                message: format!(
                    "registry returned invalid version `{candidate}` for `{}`: {e}",
                    requirement.name
                ),
            })?;
            if interval.matches(&version) {
                satisfied.push(candidate);
            }
        }

        if satisfied.is_empty() {
            return Err(CpakError::NoCompatibleVersion {
                name: requirement.name.clone(),
                requirement: requirement.req.clone(),
            });
        }

        self.cache.insert(requirement.clone(), satisfied.clone());
        Ok(satisfied)
    }

    /// Activate one concrete package and recurse into its children.
    fn gather(&mut self, package: PackageId) -> miette::Result<()> {
        // Breaks cycles and deduplicates diamonds.
        if self.visited.contains(&package) {
            return Ok(());
        }

        let deps = self.registry.deps(&package.name, &package.version)?;
        if deps.is_empty() {
            self.visited.insert(package.clone());
            self.activated.push(ActivatedNode {
                package,
                deps: None,
            });
            return Ok(());
        }

        let children = self.expand_children(&deps)?;
        // The node goes on the trace before its children so a cyclic child
        // finds it visited.
        self.visited.insert(package.clone());
        self.activated.push(ActivatedNode {
            package,
            deps: Some(children.clone()),
        });

        for child in children {
            self.gather(child)?;
        }
        Ok(())
    }

    /// Flatten a deps mapping into concrete children, one entry per
    /// satisfying version of each child requirement.
    fn expand_children(
        &mut self,
        deps: &BTreeMap<String, String>,
    ) -> Result<Vec<PackageId>, CpakError> {
        let mut children = Vec::new();
        for (name, req) in deps {
            let requirement = Requirement::new(name.clone(), req.clone());
            for version in self.versions_satisfying(&requirement)? {
                children.push(PackageId::new(name.clone(), version));
            }
        }
        Ok(children)
    }
}
