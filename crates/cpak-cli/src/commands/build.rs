use miette::Result;

use cpak_ops::ops_build::{self, BuildOptions};

pub fn exec(release: bool, verbose: bool) -> Result<()> {
    let root = super::project_root()?;
    ops_build::build(
        &root,
        &BuildOptions {
            release,
            verbose,
            ..Default::default()
        },
    )?;
    Ok(())
}
