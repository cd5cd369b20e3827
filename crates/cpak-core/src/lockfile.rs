//! Lockfile codec: the canonical on-disk serialization of a resolved
//! dependency set, with freshness semantics against `Cpak.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use cpak_util::errors::CpakError;

use crate::dependency::{PackageId, ResolvedDeps};
use crate::manifest;

/// Name of the lockfile at the project root.
pub const LOCKFILE_NAME: &str = "Cpak.lock";

/// Current lockfile schema version.
pub const LOCKFILE_VERSION: i64 = 1;

const LOCKFILE_HEADER: &str = "# This file is automatically generated by Cpak.\n\
                               # It is not intended for manual editing.\n";

/// Deterministic lockfile recording exact resolved dependency versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lockfile {
    pub version: i64,
    #[serde(default)]
    pub package: Vec<LockedPackage>,
}

/// A single locked dependency.
///
/// `dependencies` holds names only: the resolved set guarantees one version
/// per name, so a name is enough to cross-reference within the same file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Lockfile {
    /// Build a lockfile from a resolved set. Entries come out sorted by name
    /// (the resolved set iterates in name order) and inner dependency
    /// versions are dropped.
    pub fn from_resolved(deps: &ResolvedDeps) -> Self {
        let package = deps
            .iter()
            .map(|(id, inner)| LockedPackage {
                name: id.name.clone(),
                version: id.version.clone(),
                dependencies: inner
                    .as_ref()
                    .map(|children| children.iter().map(|c| c.name.clone()).collect())
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            version: LOCKFILE_VERSION,
            package,
        }
    }

    /// Rehydrate the resolved set. Inner dependency versions were dropped on
    /// encode, so they come back as empty strings; consumers look the
    /// concrete version up by name among the keys.
    pub fn to_resolved(&self) -> ResolvedDeps {
        let mut deps = ResolvedDeps::new();
        for pkg in &self.package {
            let inner = if pkg.dependencies.is_empty() {
                None
            } else {
                Some(
                    pkg.dependencies
                        .iter()
                        .map(|name| PackageId::new(name.clone(), ""))
                        .collect(),
                )
            };
            deps.insert(PackageId::new(pkg.name.clone(), pkg.version.clone()), inner);
        }
        deps
    }

    /// Serialize to a TOML document with the machine-generated header.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{LOCKFILE_HEADER}{body}"))
    }

    /// Write the lockfile to `path`, truncating any existing file.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| CpakError::Generic {
            message: format!("Failed to serialize lockfile: {e}"),
        })?;
        std::fs::write(path, content).map_err(|e| {
            CpakError::Generic {
                message: format!("Failed to write {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Parse a lockfile document, rejecting unknown schema versions.
    pub fn parse_toml(content: &str) -> Result<Self, CpakError> {
        let lock: Lockfile =
            toml::from_str(content).map_err(|e| CpakError::MalformedLockfile {
                detail: e.to_string(),
            })?;
        if lock.version != LOCKFILE_VERSION {
            return Err(CpakError::InvalidLockfileVersion {
                found: lock.version,
            });
        }
        Ok(lock)
    }
}

/// Read the lockfile in `base_dir`, returning `None` when it does not exist.
pub fn read(base_dir: &Path) -> miette::Result<Option<ResolvedDeps>> {
    let path = base_dir.join(LOCKFILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| CpakError::MalformedLockfile {
        detail: e.to_string(),
    })?;
    let lock = Lockfile::parse_toml(&content)?;
    Ok(Some(lock.to_resolved()))
}

/// Whether the lockfile must be regenerated: it does not exist, or the
/// manifest has been modified since the lockfile was last written.
pub fn is_outdated(base_dir: &Path) -> bool {
    let lock_modified = match cpak_util::fs::last_modified(&base_dir.join(LOCKFILE_NAME)) {
        Some(t) => t,
        None => return true,
    };
    match manifest::last_modified(base_dir) {
        Some(manifest_modified) => lock_modified < manifest_modified,
        None => false,
    }
}

/// Write the lockfile only when it is outdated. The no-op path keeps the
/// cached resolution authoritative and the mtime untouched.
pub fn generate(base_dir: &Path, deps: &ResolvedDeps) -> miette::Result<()> {
    if is_outdated(base_dir) {
        return overwrite(base_dir, deps);
    }
    Ok(())
}

/// Unconditionally regenerate the lockfile from a resolved set.
pub fn overwrite(base_dir: &Path, deps: &ResolvedDeps) -> miette::Result<()> {
    Lockfile::from_resolved(deps).write_to(&base_dir.join(LOCKFILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resolved() -> ResolvedDeps {
        let mut deps = ResolvedDeps::new();
        deps.insert(
            PackageId::new("app-base", "1.0.0"),
            Some(vec![PackageId::new("zlib", "1.3.1")]),
        );
        deps.insert(PackageId::new("zlib", "1.3.1"), None);
        deps
    }

    #[test]
    fn encode_drops_inner_versions() {
        let lock = Lockfile::from_resolved(&sample_resolved());
        assert_eq!(lock.version, LOCKFILE_VERSION);
        assert_eq!(lock.package.len(), 2);
        assert_eq!(lock.package[0].name, "app-base");
        assert_eq!(lock.package[0].dependencies, vec!["zlib"]);
    }

    #[test]
    fn decode_restores_empty_inner_versions() {
        let lock = Lockfile::from_resolved(&sample_resolved());
        let deps = lock.to_resolved();
        let inner = deps
            .get(&PackageId::new("app-base", "1.0.0"))
            .unwrap()
            .as_ref()
            .unwrap();
        assert_eq!(inner, &vec![PackageId::new("zlib", "")]);
        assert!(deps.get(&PackageId::new("zlib", "1.3.1")).unwrap().is_none());
    }

    #[test]
    fn header_precedes_document() {
        let text = Lockfile::from_resolved(&sample_resolved())
            .to_string_pretty()
            .unwrap();
        assert!(text.starts_with("# This file is automatically generated by Cpak."));
        assert!(text.contains("version = 1"));
    }

    #[test]
    fn future_schema_version_rejected() {
        let err = Lockfile::parse_toml("version = 2\n").unwrap_err();
        match err {
            CpakError::InvalidLockfileVersion { found } => assert_eq!(found, 2),
            other => panic!("expected InvalidLockfileVersion, got {other}"),
        }
    }

    #[test]
    fn garbage_is_malformed() {
        let err = Lockfile::parse_toml("package = \"not a table\"").unwrap_err();
        assert!(matches!(err, CpakError::MalformedLockfile { .. }));
    }
}
