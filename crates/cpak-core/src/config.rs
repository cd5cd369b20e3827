use serde::{Deserialize, Serialize};

/// User-level configuration from `~/.cpak/config.toml`.
///
/// Loaded once per invocation and passed explicitly into the operations that
/// need it; nothing reads it through ambient state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub build: BuildSettings,
}

/// Registry overrides from the `[registry]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Base URL of the package registry API.
    #[serde(default)]
    pub url: Option<String>,
}

/// Build defaults from the `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Parallel `make` jobs. `None` leaves the decision to make.
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl GlobalConfig {
    /// Load `~/.cpak/config.toml`, falling back to defaults when the file is
    /// absent.
    pub fn load() -> miette::Result<Self> {
        let path = cpak_util::dirs_path().join("config.toml");
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            cpak_util::errors::CpakError::Generic {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            cpak_util::errors::CpakError::Generic {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }
}
