//! Compiler and linker option assembly.

use std::path::PathBuf;

use cpak_core::manifest::{Manifest, Profile};

/// Options feeding every compile rule of a build.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub std_flag: String,
    pub include_dirs: Vec<PathBuf>,
    pub defines: Vec<(String, String)>,
    pub opt_level: String,
    pub debug: bool,
    pub extra_flags: Vec<String>,
}

impl CompileOptions {
    /// Render the flags shared by all translation units.
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = vec![self.std_flag.clone()];
        flags.push(format!("-O{}", self.opt_level));
        if self.debug {
            flags.push("-g".to_string());
        }
        for dir in &self.include_dirs {
            flags.push(format!("-I{}", dir.display()));
        }
        for (key, value) in &self.defines {
            flags.push(format!("-D{key}=\\\"{value}\\\""));
        }
        flags.extend(self.extra_flags.iter().cloned());
        flags
    }
}

/// Options for the final link step of a binary or shared library.
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    pub lib_dirs: Vec<PathBuf>,
    pub libs: Vec<String>,
    pub extra_flags: Vec<String>,
}

impl LinkOptions {
    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        for dir in &self.lib_dirs {
            flags.push(format!("-L{}", dir.display()));
        }
        for lib in &self.libs {
            flags.push(format!("-l{lib}"));
        }
        flags.extend(self.extra_flags.iter().cloned());
        flags
    }
}

/// Version macros injected into every compile, mirroring the project's
/// manifest: `CPAK_VERSION` plus the split major/minor/patch values.
pub fn version_defines(manifest: &Manifest) -> Vec<(String, String)> {
    let version = &manifest.package.version;
    let core = version.split(['-', '+']).next().unwrap_or(version);
    let mut parts = core.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    let patch = parts.next().unwrap_or("0");
    vec![
        ("CPAK_VERSION".to_string(), version.clone()),
        ("CPAK_MAJOR_VERSION".to_string(), major.to_string()),
        ("CPAK_MINOR_VERSION".to_string(), minor.to_string()),
        ("CPAK_PATCH_VERSION".to_string(), patch.to_string()),
    ]
}

/// Pick the effective profile: an explicit `[profile.<name>]` entry, else
/// the built-in dev or release defaults.
pub fn effective_profile(manifest: &Manifest, name: &str) -> Profile {
    manifest.profile.get(name).cloned().unwrap_or_else(|| {
        if name == "release" {
            Profile::release()
        } else {
            Profile::dev()
        }
    })
}

/// The platform's shared library extension.
pub fn shared_lib_extension() -> &'static str {
    if cfg!(target_os = "macos") {
        "dylib"
    } else {
        "so"
    }
}

/// The flag asking the driver to produce a shared library.
pub fn shared_lib_flag() -> &'static str {
    if cfg!(target_os = "macos") {
        "-dynamiclib"
    } else {
        "-shared"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_flags_order() {
        let opts = CompileOptions {
            std_flag: "-std=c++20".to_string(),
            include_dirs: vec![PathBuf::from("/deps/fmt-10.2.1/include")],
            defines: vec![("CPAK_VERSION".to_string(), "0.1.0".to_string())],
            opt_level: "0".to_string(),
            debug: true,
            extra_flags: vec!["-Wall".to_string()],
        };
        let flags = opts.to_flags();
        assert_eq!(flags[0], "-std=c++20");
        assert_eq!(flags[1], "-O0");
        assert_eq!(flags[2], "-g");
        assert!(flags.contains(&"-I/deps/fmt-10.2.1/include".to_string()));
        assert!(flags.contains(&"-DCPAK_VERSION=\\\"0.1.0\\\"".to_string()));
        assert_eq!(flags.last().unwrap(), "-Wall");
    }

    #[test]
    fn link_flags() {
        let opts = LinkOptions {
            lib_dirs: vec![PathBuf::from("/usr/local/lib")],
            libs: vec!["pthread".to_string()],
            extra_flags: vec![],
        };
        assert_eq!(opts.to_flags(), vec!["-L/usr/local/lib", "-lpthread"]);
    }

    #[test]
    fn version_defines_split_semver() {
        let manifest = Manifest::parse_toml(
            "[package]\nname = \"x\"\nversion = \"1.4.2-rc.1\"\n",
        )
        .unwrap();
        let defines = version_defines(&manifest);
        assert!(defines.contains(&("CPAK_VERSION".to_string(), "1.4.2-rc.1".to_string())));
        assert!(defines.contains(&("CPAK_MAJOR_VERSION".to_string(), "1".to_string())));
        assert!(defines.contains(&("CPAK_MINOR_VERSION".to_string(), "4".to_string())));
        assert!(defines.contains(&("CPAK_PATCH_VERSION".to_string(), "2".to_string())));
    }

    #[test]
    fn effective_profile_falls_back_to_builtins() {
        let manifest =
            Manifest::parse_toml("[package]\nname = \"x\"\nversion = \"0.1.0\"\n").unwrap();
        let dev = effective_profile(&manifest, "dev");
        assert_eq!(dev.opt_level.as_deref(), Some("0"));
        let release = effective_profile(&manifest, "release");
        assert_eq!(release.opt_level.as_deref(), Some("3"));
    }

    #[test]
    fn effective_profile_prefers_manifest_entry() {
        let manifest = Manifest::parse_toml(
            r#"
[package]
name = "x"
version = "0.1.0"

[profile.release]
opt-level = "2"
"#,
        )
        .unwrap();
        let release = effective_profile(&manifest, "release");
        assert_eq!(release.opt_level.as_deref(), Some("2"));
    }
}
