use miette::Result;

use cpak_ops::ops_new::{self, Template};

pub fn exec(name: &str, template: &str) -> Result<()> {
    let template = Template::parse(template)?;
    let cwd = std::env::current_dir().map_err(cpak_util::errors::CpakError::Io)?;
    ops_new::new(&cwd, name, template)
}
