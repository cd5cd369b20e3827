use miette::Result;

use cpak_ops::ops_lock;

pub fn exec() -> Result<()> {
    let root = super::project_root()?;
    ops_lock::lock(&root)
}
