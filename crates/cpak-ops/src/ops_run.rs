//! Operation: build the project and run the produced binary.

use std::path::Path;

use cpak_core::manifest::{Manifest, ProjectKind, MANIFEST_NAME};
use cpak_util::errors::CpakError;
use cpak_util::process::CommandBuilder;
use cpak_util::progress::status;

use crate::ops_build::{self, BuildOptions};

/// Build and execute the project binary, forwarding `args` and returning the
/// program's exit code.
pub fn run(project_root: &Path, args: &[String], release: bool) -> miette::Result<i32> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    if manifest.project_kind() != ProjectKind::Bin {
        return Err(CpakError::Generic {
            message: "`cpak run` requires a binary project".to_string(),
        }
        .into());
    }

    let result = ops_build::build(
        project_root,
        &BuildOptions {
            release,
            quiet: true,
            ..Default::default()
        },
    )?;

    status("Running", &result.artifact.display().to_string());
    let exit = CommandBuilder::new(result.artifact.display().to_string())
        .args(args.iter().cloned())
        .cwd(project_root)
        .exec_streaming()?;

    Ok(exit.code().unwrap_or(1))
}
