//! Operation: scaffold a new cpak project.

use std::path::Path;

use cpak_util::errors::CpakError;

const GITIGNORE: &str = "build/\n.cpak/\n";

/// Templates for `cpak new` / `cpak init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Bin,
    Lib,
}

impl Template {
    pub fn parse(name: &str) -> Result<Self, CpakError> {
        match name {
            "bin" => Ok(Self::Bin),
            "lib" => Ok(Self::Lib),
            other => Err(CpakError::Generic {
                message: format!("unknown template `{other}` (expected `bin` or `lib`)"),
            }),
        }
    }
}

/// Create a new project directory with a manifest and starter sources.
/// Fails if the directory already exists.
pub fn new(parent: &Path, name: &str, template: Template) -> miette::Result<()> {
    let project_dir = parent.join(name);
    if project_dir.exists() {
        return Err(CpakError::Generic {
            message: format!("destination `{}` already exists", project_dir.display()),
        }
        .into());
    }
    std::fs::create_dir_all(&project_dir).map_err(CpakError::Io)?;
    scaffold(&project_dir, name, template, true)?;
    println!("Created new cpak project `{name}`");
    Ok(())
}

/// Initialize cpak in an existing directory. Never overwrites files that are
/// already there, and does not create source directories.
pub fn init(project_dir: &Path, name: &str, template: Template) -> miette::Result<()> {
    scaffold(project_dir, name, template, false)?;
    println!("Initialized cpak project `{name}`");
    Ok(())
}

fn scaffold(
    project_dir: &Path,
    name: &str,
    template: Template,
    with_sources: bool,
) -> miette::Result<()> {
    let manifest_path = project_dir.join("Cpak.toml");
    if !manifest_path.exists() {
        std::fs::write(&manifest_path, manifest_template(name, template)).map_err(CpakError::Io)?;
    }

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, GITIGNORE).map_err(CpakError::Io)?;
    }

    if with_sources {
        let src = project_dir.join("src");
        std::fs::create_dir_all(&src).map_err(CpakError::Io)?;
        match template {
            Template::Bin => {
                std::fs::write(src.join("main.cc"), main_template(name)).map_err(CpakError::Io)?;
            }
            Template::Lib => {
                let include = project_dir.join("include").join(name);
                std::fs::create_dir_all(&include).map_err(CpakError::Io)?;
                std::fs::write(include.join(format!("{name}.h")), header_template(name))
                    .map_err(CpakError::Io)?;
                std::fs::write(src.join(format!("{name}.cc")), lib_template(name))
                    .map_err(CpakError::Io)?;
            }
        }
    }

    Ok(())
}

fn manifest_template(name: &str, template: Template) -> String {
    let build = match template {
        Template::Bin => String::new(),
        Template::Lib => "\n[build]\nkind = \"static-lib\"\n".to_string(),
    };
    format!(
        "[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nedition = \"17\"\n{build}\n[dependencies]\n"
    )
}

fn main_template(name: &str) -> String {
    format!(
        "#include <iostream>\n\nint main() {{\n  std::cout << \"Hello from {name}!\\n\";\n  return 0;\n}}\n"
    )
}

fn header_template(name: &str) -> String {
    let guard = name.to_uppercase().replace('-', "_");
    format!(
        "#ifndef {guard}_H\n#define {guard}_H\n\nnamespace {ns} {{\n\nconst char* greeting();\n\n}} // namespace {ns}\n\n#endif // {guard}_H\n",
        ns = name.replace('-', "_"),
    )
}

fn lib_template(name: &str) -> String {
    let ns = name.replace('-', "_");
    format!(
        "#include \"{name}/{name}.h\"\n\nnamespace {ns} {{\n\nconst char* greeting() {{\n  return \"Hello from {name}!\";\n}}\n\n}} // namespace {ns}\n"
    )
}
