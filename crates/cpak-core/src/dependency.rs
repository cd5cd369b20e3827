use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A package requirement drawn from the manifest: a registry-unique name
/// plus the literal version-interval string, e.g. `>=0.1.2 and <3.4.0`.
///
/// Two requirements are equal iff both fields match literally. Semantically
/// equivalent intervals spelled differently are distinct requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    pub req: String,
}

impl Requirement {
    pub fn new(name: impl Into<String>, req: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            req: req.into(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.req)
    }
}

/// A concrete package: a name plus a fully qualified version from the
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// The resolver output and lockfile payload: each resolved package mapped to
/// its direct dependencies, `None` marking a leaf.
///
/// Invariants: at most one version per name, and every name appearing in any
/// value also appears as a key (transitive closure). The `BTreeMap` ordering
/// gives the sorted-by-name iteration the lockfile emits.
pub type ResolvedDeps = BTreeMap<PackageId, Option<Vec<PackageId>>>;
