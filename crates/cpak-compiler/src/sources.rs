//! Source discovery under `src/`.

use std::path::{Path, PathBuf};

use crate::lang::{classify, Lang};

/// Recursively collect C/C++ sources under `dir`, sorted by path so object
/// lists come out stable across runs.
pub fn collect_sources(dir: &Path) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    walk(dir, &mut sources);
    sources.sort();
    sources
}

fn walk(dir: &Path, sources: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, sources);
        } else if classify(&path).is_some() {
            sources.push(path);
        }
    }
}

/// The language of a source set: C++ when any C++ unit is present, C for a
/// pure C tree. Mixed projects compile everything with the C++ driver.
pub fn project_lang(sources: &[PathBuf]) -> Lang {
    if sources.iter().any(|s| classify(s) == Some(Lang::Cxx)) {
        Lang::Cxx
    } else {
        Lang::C
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_recursively_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("net")).unwrap();
        std::fs::write(src.join("main.cc"), "").unwrap();
        std::fs::write(src.join("net/socket.cc"), "").unwrap();
        std::fs::write(src.join("util.h"), "").unwrap();
        std::fs::write(src.join("notes.txt"), "").unwrap();

        let sources = collect_sources(&src);
        assert_eq!(sources.len(), 2);
        assert!(sources[0].ends_with("main.cc"));
        assert!(sources[1].ends_with("net/socket.cc"));
    }

    #[test]
    fn missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(collect_sources(&tmp.path().join("src")).is_empty());
    }

    #[test]
    fn lang_detection() {
        assert_eq!(
            project_lang(&[PathBuf::from("a.c"), PathBuf::from("b.cc")]),
            Lang::Cxx
        );
        assert_eq!(project_lang(&[PathBuf::from("a.c")]), Lang::C);
        assert_eq!(project_lang(&[]), Lang::C);
    }
}
