use miette::Result;

use cpak_ops::ops_fetch;

pub fn exec(verbose: bool) -> Result<()> {
    let root = super::project_root()?;
    ops_fetch::fetch(&root, verbose)
}
