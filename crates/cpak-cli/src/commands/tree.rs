use miette::Result;

use cpak_ops::ops_tree;

pub fn exec(depth: Option<usize>) -> Result<()> {
    let root = super::project_root()?;
    print!("{}", ops_tree::tree(&root, depth)?);
    Ok(())
}
