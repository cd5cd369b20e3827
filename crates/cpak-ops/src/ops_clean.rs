//! Operation: remove build artifacts.

use std::path::Path;

use cpak_util::errors::CpakError;

/// Result of a clean operation.
pub enum CleanResult {
    Cleaned,
    NothingToClean,
}

/// Remove the `build/` directory so the next build runs completely fresh.
/// Cached dependency sources under `.cpak/` survive; `cpak fetch` prunes
/// those.
pub fn clean(project_root: &Path) -> miette::Result<CleanResult> {
    let build_dir = project_root.join("build");
    if build_dir.exists() {
        std::fs::remove_dir_all(&build_dir).map_err(CpakError::Io)?;
        Ok(CleanResult::Cleaned)
    } else {
        Ok(CleanResult::NothingToClean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_build_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let build = tmp.path().join("build").join("dev");
        std::fs::create_dir_all(&build).unwrap();
        std::fs::write(build.join("app"), "bin").unwrap();

        assert!(matches!(clean(tmp.path()).unwrap(), CleanResult::Cleaned));
        assert!(!tmp.path().join("build").exists());
    }

    #[test]
    fn clean_without_build_dir_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            clean(tmp.path()).unwrap(),
            CleanResult::NothingToClean
        ));
    }

    #[test]
    fn clean_preserves_package_cache() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build")).unwrap();
        let cached = tmp.path().join(".cpak").join("packages").join("fmt-10.2.1");
        std::fs::create_dir_all(&cached).unwrap();

        clean(tmp.path()).unwrap();
        assert!(cached.is_dir());
    }
}
