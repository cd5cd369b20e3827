use miette::Result;

use cpak_ops::ops_run;

pub fn exec(release: bool, args: &[String]) -> Result<()> {
    let root = super::project_root()?;
    let code = ops_run::run(&root, args, release)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
