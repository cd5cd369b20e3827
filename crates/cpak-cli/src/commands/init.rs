use miette::Result;

use cpak_ops::ops_new::{self, Template};

pub fn exec(template: &str) -> Result<()> {
    let template = Template::parse(template)?;
    let cwd = std::env::current_dir().map_err(cpak_util::errors::CpakError::Io)?;
    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());
    ops_new::init(&cwd, &name, template)
}
