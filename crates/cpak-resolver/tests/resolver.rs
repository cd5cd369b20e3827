//! End-to-end resolution scenarios over the in-memory fixture registry.

use std::collections::BTreeMap;

use cpak_core::dependency::{PackageId, ResolvedDeps};
use cpak_core::lockfile::Lockfile;
use cpak_core::manifest::Manifest;
use cpak_registry::fixture::FixtureRegistry;
use cpak_resolver::cnf;
use cpak_resolver::gather::Gatherer;
use cpak_resolver::resolver::{generate_lockfile, Resolver};
use cpak_resolver::sat;
use tempfile::TempDir;

fn requirements(top: &[(&str, &str)]) -> BTreeMap<String, String> {
    top.iter()
        .map(|(n, r)| (n.to_string(), r.to_string()))
        .collect()
}

/// Invariant 1: one version per name.
fn assert_one_version_per_name(resolved: &ResolvedDeps) {
    let mut names = std::collections::HashSet::new();
    for id in resolved.keys() {
        assert!(
            names.insert(&id.name),
            "name `{}` resolved to more than one version",
            id.name
        );
    }
}

/// Invariant 2: transitive closure over names.
fn assert_transitively_closed(resolved: &ResolvedDeps) {
    let names: std::collections::HashSet<&str> =
        resolved.keys().map(|id| id.name.as_str()).collect();
    for children in resolved.values().flatten() {
        for child in children {
            assert!(
                names.contains(child.name.as_str()),
                "dependency `{}` missing from the resolved set",
                child.name
            );
        }
    }
}

#[test]
fn s1_single_leaf() {
    let mut reg = FixtureRegistry::new();
    reg.publish("foo", "1.0.0", &[]);

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("foo", "=1.0.0")]))
        .unwrap();

    assert_eq!(resolved.len(), 1);
    assert!(resolved
        .get(&PackageId::new("foo", "1.0.0"))
        .unwrap()
        .is_none());

    let lock = Lockfile::from_resolved(&resolved);
    assert_eq!(lock.version, 1);
    assert_eq!(lock.package.len(), 1);
    assert_eq!(lock.package[0].name, "foo");
    assert_eq!(lock.package[0].version, "1.0.0");
    assert!(lock.package[0].dependencies.is_empty());
}

#[test]
fn s2_diamond() {
    let mut reg = FixtureRegistry::new();
    reg.publish("a", "1.0.0", &[("c", ">=1.0.0 and <2.0.0")]);
    reg.publish("b", "1.0.0", &[("c", ">=1.0.0 and <2.0.0")]);
    reg.publish("c", "1.0.0", &[]);

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("a", "=1.0.0"), ("b", "=1.0.0")]))
        .unwrap();

    assert_eq!(resolved.len(), 3);
    assert!(resolved.contains_key(&PackageId::new("c", "1.0.0")));
    assert_one_version_per_name(&resolved);
    assert_transitively_closed(&resolved);
}

#[test]
fn s3_conflict_is_unsatisfiable() {
    let mut reg = FixtureRegistry::new();
    reg.publish("a", "1.0.0", &[("c", "=1.0.0")]);
    reg.publish("b", "1.0.0", &[("c", "=2.0.0")]);
    reg.publish("c", "1.0.0", &[]);
    reg.publish("c", "2.0.0", &[]);

    let err = Resolver::new(&reg)
        .resolve(&requirements(&[("a", "=1.0.0"), ("b", "=1.0.0")]))
        .unwrap_err();
    assert!(err.to_string().contains("unsatisfiable"));
}

#[test]
fn s4_interval_expansion_picks_one() {
    let mut reg = FixtureRegistry::new();
    for v in ["1.0.0", "1.1.0", "1.2.0", "2.0.0"] {
        reg.publish("x", v, &[]);
    }

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("x", ">=1.0.0 and <2.0.0")]))
        .unwrap();

    assert_one_version_per_name(&resolved);
    let (id, _) = resolved.iter().next().unwrap();
    assert_eq!(id.name, "x");
    assert!(["1.0.0", "1.1.0", "1.2.0"].contains(&id.version.as_str()));
    assert!(!resolved.contains_key(&PackageId::new("x", "2.0.0")));
}

#[test]
fn s5_cycle_resolves_both_sides() {
    let mut reg = FixtureRegistry::new();
    reg.publish("a", "1.0.0", &[("b", "=1.0.0")]);
    reg.publish("b", "1.0.0", &[("a", "=1.0.0")]);

    // Property 5: the gatherer activates each concrete package exactly once.
    let nodes = Gatherer::new(&reg)
        .gather_all(&requirements(&[("a", "=1.0.0")]))
        .unwrap();
    assert_eq!(nodes.len(), 2);

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("a", "=1.0.0")]))
        .unwrap();
    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains_key(&PackageId::new("a", "1.0.0")));
    assert!(resolved.contains_key(&PackageId::new("b", "1.0.0")));
    assert_transitively_closed(&resolved);
}

#[test]
fn s6_lockfile_round_trip_is_stable() {
    let mut reg = FixtureRegistry::new();
    reg.publish("a", "1.0.0", &[("c", ">=1.0.0 and <2.0.0")]);
    reg.publish("b", "1.0.0", &[("c", ">=1.0.0 and <2.0.0")]);
    reg.publish("c", "1.0.0", &[]);

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("a", "=1.0.0"), ("b", "=1.0.0")]))
        .unwrap();

    let encoded = Lockfile::from_resolved(&resolved).to_string_pretty().unwrap();
    let decoded = Lockfile::parse_toml(&encoded).unwrap().to_resolved();
    let re_encoded = Lockfile::from_resolved(&decoded).to_string_pretty().unwrap();
    assert_eq!(encoded, re_encoded);
}

#[test]
fn empty_requirements_resolve_to_empty_set() {
    let reg = FixtureRegistry::new();
    let resolved = Resolver::new(&reg).resolve(&BTreeMap::new()).unwrap();
    assert!(resolved.is_empty());

    let lock = Lockfile::from_resolved(&resolved);
    assert!(lock.package.is_empty());
}

#[test]
fn assignment_satisfies_every_clause() {
    // Property 4: the solver's output, checked against the CNF it solved.
    let mut reg = FixtureRegistry::new();
    reg.publish("a", "1.0.0", &[("c", ">=1.0.0")]);
    reg.publish("b", "1.0.0", &[("c", ">=2.0.0")]);
    reg.publish("c", "1.0.0", &[]);
    reg.publish("c", "2.0.0", &[]);
    reg.publish("c", "2.1.0", &[]);

    let nodes = Gatherer::new(&reg)
        .gather_all(&requirements(&[("a", "=1.0.0"), ("b", "=1.0.0")]))
        .unwrap();
    let clauses = cnf::create_cnf(&nodes);
    let assignment = sat::solve(&clauses, nodes.len()).unwrap();

    for clause in &clauses {
        assert!(
            clause.iter().any(|l| assignment.contains(l)),
            "clause {clause:?} not satisfied by {assignment:?}"
        );
    }
}

#[test]
fn deep_chain_resolves() {
    let mut reg = FixtureRegistry::new();
    reg.publish("top", "1.0.0", &[("mid", ">=1.0.0 and <2.0.0")]);
    reg.publish("mid", "1.4.0", &[("leaf", ">=0.1.0")]);
    reg.publish("mid", "1.5.0", &[("leaf", ">=0.1.0")]);
    reg.publish("leaf", "0.1.2", &[]);

    let resolved = Resolver::new(&reg)
        .resolve(&requirements(&[("top", "=1.0.0")]))
        .unwrap();

    assert_one_version_per_name(&resolved);
    assert_transitively_closed(&resolved);
    assert!(resolved.contains_key(&PackageId::new("leaf", "0.1.2")));
    assert_eq!(resolved.len(), 3);
}

#[test]
fn install_deps_uses_fresh_lockfile_without_touching_registry() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("Cpak.toml"),
        r#"
[package]
name = "app"
version = "0.1.0"

[dependencies]
foo = "=1.0.0"
"#,
    )
    .unwrap();
    let manifest = Manifest::from_path(&tmp.path().join("Cpak.toml")).unwrap();

    let mut resolved = ResolvedDeps::new();
    resolved.insert(PackageId::new("foo", "1.0.0"), None);
    std::thread::sleep(std::time::Duration::from_millis(20));
    cpak_core::lockfile::overwrite(tmp.path(), &resolved).unwrap();

    // Offline registry: any network call would fail the test.
    let mut reg = FixtureRegistry::new();
    reg.set_offline(true);

    let installed = Resolver::new(&reg)
        .install_deps(tmp.path(), &manifest)
        .unwrap();
    assert!(installed.contains_key(&PackageId::new("foo", "1.0.0")));
}

#[test]
fn install_deps_re_resolves_when_manifest_newer() {
    let tmp = TempDir::new().unwrap();

    let mut stale = ResolvedDeps::new();
    stale.insert(PackageId::new("foo", "0.9.0"), None);
    cpak_core::lockfile::overwrite(tmp.path(), &stale).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));
    std::fs::write(
        tmp.path().join("Cpak.toml"),
        r#"
[package]
name = "app"
version = "0.1.0"

[dependencies]
foo = "=1.0.0"
"#,
    )
    .unwrap();
    let manifest = Manifest::from_path(&tmp.path().join("Cpak.toml")).unwrap();

    let mut reg = FixtureRegistry::new();
    reg.publish("foo", "1.0.0", &[]);

    let installed = Resolver::new(&reg)
        .install_deps(tmp.path(), &manifest)
        .unwrap();
    assert!(installed.contains_key(&PackageId::new("foo", "1.0.0")));
    assert!(!installed.contains_key(&PackageId::new("foo", "0.9.0")));
}

#[test]
fn generate_lockfile_writes_when_outdated() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("Cpak.toml"),
        "[package]\nname = \"app\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();

    let mut resolved = ResolvedDeps::new();
    resolved.insert(PackageId::new("foo", "1.0.0"), None);

    generate_lockfile(tmp.path(), &resolved).unwrap();
    let written = std::fs::read_to_string(tmp.path().join("Cpak.lock")).unwrap();
    assert!(written.contains("name = \"foo\""));
}

#[test]
fn dev_dependencies_join_the_closure() {
    let manifest = Manifest::parse_toml(
        r#"
[package]
name = "app"
version = "0.1.0"

[dependencies]
foo = "=1.0.0"

[dev-dependencies]
catch = "=3.0.0"
"#,
    )
    .unwrap();

    let mut reg = FixtureRegistry::new();
    reg.publish("foo", "1.0.0", &[]);
    reg.publish("catch", "3.0.0", &[]);

    let resolved = Resolver::new(&reg)
        .resolve(&manifest.requirement_set())
        .unwrap();
    assert!(resolved.contains_key(&PackageId::new("catch", "3.0.0")));
    assert!(resolved.contains_key(&PackageId::new("foo", "1.0.0")));
}
