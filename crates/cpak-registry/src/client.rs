use std::collections::BTreeMap;

use cpak_util::errors::CpakError;

/// The registry operations the resolver consumes.
///
/// Implementations report transport failures as
/// [`CpakError::RegistryUnavailable`] and unknown names as
/// [`CpakError::UnknownPackage`]; the resolver propagates both unchanged.
pub trait Registry {
    /// All known publicly released versions of a package, in registry order.
    fn versions(&self, name: &str) -> Result<Vec<String>, CpakError>;

    /// Direct requirements of one exact release, keyed by package name.
    /// An empty mapping marks a leaf.
    fn deps(&self, name: &str, version: &str) -> Result<BTreeMap<String, String>, CpakError>;
}
