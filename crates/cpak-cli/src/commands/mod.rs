//! Command dispatch and handler modules.

mod build;
mod clean;
mod fetch;
mod init;
mod lock;
mod new;
mod run;
mod tree;

use std::path::PathBuf;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New { name, template } => new::exec(&name, &template),
        Command::Init { template } => init::exec(&template),
        Command::Build { release } => build::exec(release, cli.verbose),
        Command::Run { release, args } => run::exec(release, &args),
        Command::Clean => clean::exec(),
        Command::Fetch => fetch::exec(cli.verbose),
        Command::Lock => lock::exec(),
        Command::Tree { depth } => tree::exec(depth),
    }
}

/// Locate the project root by walking up from the working directory until a
/// `Cpak.toml` appears.
pub(crate) fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(cpak_util::errors::CpakError::Io)?;
    cpak_util::fs::find_ancestor_with(&cwd, cpak_core::manifest::MANIFEST_NAME).ok_or_else(|| {
        cpak_util::errors::CpakError::Manifest {
            message: "could not find Cpak.toml in this directory or any parent".to_string(),
        }
        .into()
    })
}
