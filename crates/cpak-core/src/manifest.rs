use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the manifest file at the project root.
pub const MANIFEST_NAME: &str = "Cpak.toml";

/// The parsed representation of a `Cpak.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub build: Option<BuildSection>,

    #[serde(default)]
    pub profile: BTreeMap<String, Profile>,
}

/// Package identity and metadata from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    /// C++ standard year, e.g. `"17"` or `"20"`.
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
}

/// What kind of artifact the project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    Bin,
    StaticLib,
    SharedLib,
}

impl Default for ProjectKind {
    fn default() -> Self {
        Self::Bin
    }
}

/// Build configuration from the `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default)]
    pub kind: ProjectKind,
    /// Compiler binary override; otherwise `$CXX`/`$CC` or a platform default.
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default, rename = "compile-flags")]
    pub compile_flags: Vec<String>,
    #[serde(default, rename = "link-flags")]
    pub link_flags: Vec<String>,
}

/// Per-profile compiler settings from `[profile.<name>]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, rename = "opt-level")]
    pub opt_level: Option<String>,
    #[serde(default)]
    pub debug: Option<bool>,
}

impl Profile {
    /// Defaults for `cpak build` without `--release`.
    pub fn dev() -> Self {
        Self {
            opt_level: Some("0".to_string()),
            debug: Some(true),
        }
    }

    /// Defaults for `cpak build --release`.
    pub fn release() -> Self {
        Self {
            opt_level: Some("3".to_string()),
            debug: Some(false),
        }
    }
}

impl Manifest {
    /// Load and parse a `Cpak.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            cpak_util::errors::CpakError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a `Cpak.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            cpak_util::errors::CpakError::Manifest {
                message: format!("Failed to parse Cpak.toml: {e}"),
            }
            .into()
        })
    }

    /// The top-level requirement set handed to the resolver: package name
    /// mapped to its literal interval string. Dev-dependencies participate in
    /// the same closure.
    pub fn requirement_set(&self) -> BTreeMap<String, String> {
        let mut set = self.dependencies.clone();
        for (name, req) in &self.dev_dependencies {
            set.entry(name.clone()).or_insert_with(|| req.clone());
        }
        set
    }

    /// What kind of artifact this project builds.
    pub fn project_kind(&self) -> ProjectKind {
        self.build.as_ref().map(|b| b.kind).unwrap_or_default()
    }

    /// The C++ standard year declared in `[package].edition`, default `17`.
    pub fn edition(&self) -> &str {
        self.package.edition.as_deref().unwrap_or("17")
    }
}

/// Last modification time of the manifest in `base_dir`, if present.
pub fn last_modified(base_dir: &Path) -> Option<std::time::SystemTime> {
    cpak_util::fs::last_modified(&base_dir.join(MANIFEST_NAME))
}
