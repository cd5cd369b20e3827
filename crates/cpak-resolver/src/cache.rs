//! Per-resolution cache of interval expansions.

use std::collections::HashMap;

use cpak_core::dependency::Requirement;

/// Memoizes `requirement -> satisfying versions` for one resolution run.
///
/// Keys compare by literal string equality: `>=1.0` and `>=1.0.0` are
/// distinct entries even though they denote the same interval. This is an
/// intentional simplification; two spellings of a requirement just expand
/// twice.
#[derive(Debug, Default)]
pub struct IntervalCache {
    entries: HashMap<Requirement, Vec<String>>,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached satisfying versions for a requirement, if present.
    pub fn lookup(&self, requirement: &Requirement) -> Option<&[String]> {
        self.entries.get(requirement).map(Vec::as_slice)
    }

    /// Store the expansion of a requirement. Idempotent on equal inputs.
    pub fn insert(&mut self, requirement: Requirement, versions: Vec<String>) {
        self.entries.insert(requirement, versions);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let mut cache = IntervalCache::new();
        let req = Requirement::new("fmt", ">=1.0.0");
        assert!(cache.lookup(&req).is_none());

        cache.insert(req.clone(), vec!["1.0.0".into(), "1.2.0".into()]);
        assert_eq!(cache.lookup(&req), Some(&["1.0.0".into(), "1.2.0".into()][..]));
    }

    #[test]
    fn literal_keying() {
        let mut cache = IntervalCache::new();
        cache.insert(Requirement::new("fmt", ">=1.0.0"), vec!["1.0.0".into()]);
        // Same interval, different spelling: a miss.
        assert!(cache.lookup(&Requirement::new("fmt", ">=1.0")).is_none());
    }

    #[test]
    fn insert_is_idempotent() {
        let mut cache = IntervalCache::new();
        let req = Requirement::new("fmt", "=1.0.0");
        cache.insert(req.clone(), vec!["1.0.0".into()]);
        cache.insert(req.clone(), vec!["1.0.0".into()]);
        assert_eq!(cache.len(), 1);
    }
}
