//! Operation: build the project (resolve, fetch, emit Makefile, run make).

use std::path::{Path, PathBuf};

use cpak_compiler::emitter::{emit_makefile, BuildPlan};
use cpak_compiler::lang;
use cpak_compiler::options::{effective_profile, version_defines, CompileOptions, LinkOptions};
use cpak_compiler::sources::{collect_sources, project_lang};
use cpak_core::config::GlobalConfig;
use cpak_core::manifest::{Manifest, MANIFEST_NAME};
use cpak_registry::cache::PackageCache;
use cpak_resolver::resolver::{generate_lockfile, Resolver};
use cpak_util::errors::CpakError;
use cpak_util::process::CommandBuilder;
use cpak_util::progress::{status, status_info};

/// Options for a build invocation.
#[derive(Default)]
pub struct BuildOptions {
    pub release: bool,
    pub verbose: bool,
    /// Suppress non-error output (used by `cpak run`).
    pub quiet: bool,
}

/// Result of a build operation.
pub struct BuildResult {
    pub profile_name: String,
    pub build_dir: PathBuf,
    /// The produced binary or library.
    pub artifact: PathBuf,
}

/// Run the full build pipeline.
pub fn build(project_root: &Path, opts: &BuildOptions) -> miette::Result<BuildResult> {
    // 1. Manifest and configuration
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    let config = GlobalConfig::load().unwrap_or_default();
    let profile_name = if opts.release { "release" } else { "dev" };

    if !opts.quiet {
        status(
            "Compiling",
            &format!(
                "{} v{} ({profile_name})",
                manifest.package.name, manifest.package.version
            ),
        );
    }

    // 2. Dependency resolution, lockfile, archives
    let registry = crate::open_registry(&config)?;
    let resolver = Resolver::new(&registry);
    let resolved = resolver.install_deps(project_root, &manifest)?;
    generate_lockfile(project_root, &resolved)?;
    if opts.verbose {
        status_info("Resolved", &format!("{} dependencies", resolved.len()));
    }

    let cache = PackageCache::new(project_root);
    crate::ops_fetch::ensure_fetched(&registry, &cache, &resolved, opts.verbose)?;

    // 3. Source discovery
    let src_root = project_root.join("src");
    let sources = collect_sources(&src_root);
    if sources.is_empty() {
        return Err(CpakError::Compilation {
            message: "no C/C++ sources found under src/".to_string(),
        }
        .into());
    }
    let lang = project_lang(&sources);

    // 4. Flag assembly
    let profile = effective_profile(&manifest, profile_name);
    let mut include_dirs: Vec<PathBuf> = Vec::new();
    let local_include = project_root.join("include");
    if local_include.is_dir() {
        include_dirs.push(local_include);
    }
    include_dirs.extend(
        resolved
            .keys()
            .filter_map(|id| cache.include_dir(&id.name, &id.version)),
    );
    let build_section = manifest.build.clone().unwrap_or_default();

    let compile_opts = CompileOptions {
        std_flag: lang::std_flag(lang, manifest.edition()),
        include_dirs,
        defines: version_defines(&manifest),
        opt_level: profile.opt_level.unwrap_or_else(|| "0".to_string()),
        debug: profile.debug.unwrap_or(profile_name != "release"),
        extra_flags: build_section.compile_flags.clone(),
    };
    let link_opts = LinkOptions {
        lib_dirs: Vec::new(),
        libs: Vec::new(),
        extra_flags: build_section.link_flags.clone(),
    };

    // 5. Emit the Makefile and run make
    let build_dir = project_root.join("build").join(profile_name);
    cpak_util::fs::ensure_dir(&build_dir).map_err(CpakError::Io)?;

    let plan = BuildPlan {
        compiler: lang::compiler(lang, build_section.compiler.as_deref()),
        compile_flags: compile_opts.to_flags(),
        link_flags: link_opts.to_flags(),
        sources,
        src_root,
        kind: manifest.project_kind(),
        name: manifest.package.name.clone(),
    };
    std::fs::write(build_dir.join("Makefile"), emit_makefile(&plan)).map_err(CpakError::Io)?;

    let mut make = CommandBuilder::new("make").arg("-C").arg(build_dir.display().to_string());
    if let Some(jobs) = config.build.jobs {
        make = make.arg(format!("-j{jobs}"));
    }
    let exit = make.exec_streaming()?;
    if !exit.success() {
        return Err(CpakError::Compilation {
            message: format!("make exited with {exit}"),
        }
        .into());
    }

    if !opts.quiet {
        status("Finished", &format!("{profile_name} profile"));
    }

    Ok(BuildResult {
        profile_name: profile_name.to_string(),
        artifact: build_dir.join(plan.target_filename()),
        build_dir,
    })
}
