use std::fmt;
use std::path::Path;

/// Source language of a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    C,
    Cxx,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::C => f.write_str("C"),
            Lang::Cxx => f.write_str("C++"),
        }
    }
}

/// Classify a source file by extension. Headers and unrelated files are
/// `None`.
pub fn classify(path: &Path) -> Option<Lang> {
    match path.extension()?.to_str()? {
        "c" => Some(Lang::C),
        "cc" | "cpp" | "cxx" => Some(Lang::Cxx),
        _ => None,
    }
}

/// The `-std=` flag for a language edition year, e.g. `("20") -> -std=c++20`.
pub fn std_flag(lang: Lang, edition: &str) -> String {
    match lang {
        Lang::C => format!("-std=c{edition}"),
        Lang::Cxx => format!("-std=c++{edition}"),
    }
}

/// The compiler driver to use: an explicit override, then `$CXX`/`$CC`,
/// then the platform default.
pub fn compiler(lang: Lang, explicit: Option<&str>) -> String {
    if let Some(c) = explicit {
        return c.to_string();
    }
    match lang {
        Lang::C => std::env::var("CC").unwrap_or_else(|_| "cc".to_string()),
        Lang::Cxx => std::env::var("CXX").unwrap_or_else(|_| "c++".to_string()),
    }
}
