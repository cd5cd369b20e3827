//! Project-local package cache holding extracted dependency sources.
//!
//! Layout: `<project>/.cpak/packages/<name>-<version>/`, with the release
//! tarball kept alongside as `<name>-<version>.tar.gz`. The build driver
//! points `-I` at each package's `include/` directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use cpak_util::errors::CpakError;

/// Cache of downloaded and extracted packages under `.cpak/packages/`.
#[derive(Debug, Clone)]
pub struct PackageCache {
    root: PathBuf,
}

impl PackageCache {
    /// Create a cache rooted at `project_root/.cpak/packages/`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: project_root.join(".cpak").join("packages"),
        }
    }

    /// The root directory of this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_name(name: &str, version: &str) -> String {
        format!("{name}-{version}")
    }

    /// Directory holding one extracted package.
    pub fn package_dir(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(Self::entry_name(name, version))
    }

    /// The package's public header directory, if the package ships one.
    pub fn include_dir(&self, name: &str, version: &str) -> Option<PathBuf> {
        let dir = self.package_dir(name, version).join("include");
        dir.is_dir().then_some(dir)
    }

    /// Whether the package has been extracted into the cache.
    pub fn has_package(&self, name: &str, version: &str) -> bool {
        self.package_dir(name, version).is_dir()
    }

    fn archive_path(&self, name: &str, version: &str) -> PathBuf {
        self.root
            .join(format!("{}.tar.gz", Self::entry_name(name, version)))
    }

    /// Store a release tarball and unpack it into the package directory.
    pub fn install(&self, name: &str, version: &str, archive: &[u8]) -> miette::Result<PathBuf> {
        fs::create_dir_all(&self.root).map_err(CpakError::Io)?;
        let tarball = self.archive_path(name, version);
        fs::write(&tarball, archive).map_err(CpakError::Io)?;
        self.extract(name, version, &tarball)
    }

    /// Unpack a tarball into the package directory.
    ///
    /// Tarballs that wrap their content in a single top-level directory
    /// (the common `name-version/` layout) have that prefix stripped.
    fn extract(&self, name: &str, version: &str, tarball: &Path) -> miette::Result<PathBuf> {
        let dest = self.package_dir(name, version);
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(CpakError::Io)?;
        }

        let staging = self
            .root
            .join(format!(".extract-{}", Self::entry_name(name, version)));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(CpakError::Io)?;
        }
        fs::create_dir_all(&staging).map_err(CpakError::Io)?;

        let file = fs::File::open(tarball).map_err(CpakError::Io)?;
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        archive.unpack(&staging).map_err(|e| CpakError::Generic {
            message: format!("Failed to unpack {}: {e}", tarball.display()),
        })?;

        let source = single_top_level_dir(&staging).unwrap_or_else(|| staging.clone());
        fs::rename(&source, &dest).map_err(CpakError::Io)?;
        if staging.exists() {
            let _ = fs::remove_dir_all(&staging);
        }

        Ok(dest)
    }

    /// Remove cached packages not present in the resolved set.
    ///
    /// `keep` contains `(name, version)` pairs that should be retained.
    /// Returns the number of package directories removed.
    pub fn prune(&self, keep: &HashSet<(String, String)>) -> u32 {
        let mut removed = 0u32;
        let Ok(entries) = fs::read_dir(&self.root) else {
            return removed;
        };

        let keep_names: HashSet<String> = keep
            .iter()
            .map(|(n, v)| Self::entry_name(n, v))
            .collect();

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(stem) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() {
                if !keep_names.contains(stem) {
                    let _ = fs::remove_dir_all(&path);
                    removed += 1;
                }
            } else if let Some(dir_name) = stem.strip_suffix(".tar.gz") {
                if !keep_names.contains(dir_name) {
                    let _ = fs::remove_file(&path);
                }
            }
        }
        removed
    }
}

/// If `dir` contains exactly one entry and it is a directory, return it.
fn single_top_level_dir(dir: &Path) -> Option<PathBuf> {
    let mut entries = fs::read_dir(dir).ok()?.flatten();
    let first = entries.next()?.path();
    if entries.next().is_none() && first.is_dir() {
        Some(first)
    } else {
        None
    }
}
