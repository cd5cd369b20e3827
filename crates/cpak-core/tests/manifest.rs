use cpak_core::manifest::{self, Manifest, ProjectKind};
use tempfile::TempDir;

#[test]
fn from_path_reads_manifest() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Cpak.toml");
    std::fs::write(
        &path,
        r#"
[package]
name = "server"
version = "1.2.3"
edition = "20"
authors = ["Jo <jo@example.com>"]

[dependencies]
asio = ">=1.28.0 and <2.0.0"
"#,
    )
    .unwrap();

    let m = Manifest::from_path(&path).unwrap();
    assert_eq!(m.package.name, "server");
    assert_eq!(m.package.version, "1.2.3");
    assert_eq!(m.package.authors.len(), 1);
    assert_eq!(m.dependencies.len(), 1);
}

#[test]
fn from_path_missing_file_errors() {
    let tmp = TempDir::new().unwrap();
    let err = Manifest::from_path(&tmp.path().join("Cpak.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn last_modified_tracks_manifest() {
    let tmp = TempDir::new().unwrap();
    assert!(manifest::last_modified(tmp.path()).is_none());
    std::fs::write(tmp.path().join("Cpak.toml"), "").unwrap();
    assert!(manifest::last_modified(tmp.path()).is_some());
}

#[test]
fn shared_lib_kind_parses() {
    let m = Manifest::parse_toml(
        r#"
[package]
name = "mylib"
version = "0.1.0"

[build]
kind = "shared-lib"
"#,
    )
    .unwrap();
    assert_eq!(m.project_kind(), ProjectKind::SharedLib);
}

#[test]
fn profiles_parse() {
    let m = Manifest::parse_toml(
        r#"
[package]
name = "x"
version = "0.1.0"

[profile.release]
opt-level = "2"
debug = false
"#,
    )
    .unwrap();
    let release = m.profile.get("release").unwrap();
    assert_eq!(release.opt_level.as_deref(), Some("2"));
    assert_eq!(release.debug, Some(false));
}
