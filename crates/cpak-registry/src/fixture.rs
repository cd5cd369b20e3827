//! In-memory registry fixture for tests.

use std::collections::{BTreeMap, HashMap};

use cpak_util::errors::CpakError;

use crate::client::Registry;

/// A registry backed by in-memory tables, for exercising resolution without
/// network access. Publish order is preserved in `versions` responses.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    versions: HashMap<String, Vec<String>>,
    deps: HashMap<(String, String), BTreeMap<String, String>>,
    offline: bool,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a release with its direct requirements.
    pub fn publish(&mut self, name: &str, version: &str, deps: &[(&str, &str)]) {
        self.versions
            .entry(name.to_string())
            .or_default()
            .push(version.to_string());
        let dep_map = deps
            .iter()
            .map(|(n, r)| (n.to_string(), r.to_string()))
            .collect();
        self.deps
            .insert((name.to_string(), version.to_string()), dep_map);
    }

    /// Make every call fail with `RegistryUnavailable`, simulating an
    /// unreachable registry.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn check_online(&self) -> Result<(), CpakError> {
        if self.offline {
            return Err(CpakError::RegistryUnavailable {
                message: "fixture registry is offline".to_string(),
            });
        }
        Ok(())
    }
}

impl Registry for FixtureRegistry {
    fn versions(&self, name: &str) -> Result<Vec<String>, CpakError> {
        self.check_online()?;
        self.versions
            .get(name)
            .cloned()
            .ok_or_else(|| CpakError::UnknownPackage {
                name: name.to_string(),
            })
    }

    fn deps(&self, name: &str, version: &str) -> Result<BTreeMap<String, String>, CpakError> {
        self.check_online()?;
        if !self.versions.contains_key(name) {
            return Err(CpakError::UnknownPackage {
                name: name.to_string(),
            });
        }
        Ok(self
            .deps
            .get(&(name.to_string(), version.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
