//! Makefile emission.
//!
//! `cpak build` writes a Makefile into the build directory and runs `make`
//! there; incremental rebuilds ride on make's own mtime checks.

use std::path::{Path, PathBuf};

use cpak_core::manifest::ProjectKind;

use crate::options;

/// Everything the emitter needs to describe one build.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub compiler: String,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    /// Absolute paths of the translation units.
    pub sources: Vec<PathBuf>,
    /// Directory the object tree mirrors (usually `<project>/src`).
    pub src_root: PathBuf,
    pub kind: ProjectKind,
    pub name: String,
}

impl BuildPlan {
    /// File name of the produced artifact.
    pub fn target_filename(&self) -> String {
        match self.kind {
            ProjectKind::Bin => self.name.clone(),
            ProjectKind::StaticLib => format!("lib{}.a", self.name),
            ProjectKind::SharedLib => {
                format!("lib{}.{}", self.name, options::shared_lib_extension())
            }
        }
    }

    fn object_path(&self, source: &Path) -> PathBuf {
        let rel = source
            .strip_prefix(&self.src_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| {
                PathBuf::from(source.file_name().map(ToOwned::to_owned).unwrap_or_default())
            });
        Path::new("obj").join(rel).with_extension("o")
    }
}

/// Render the Makefile for a build plan.
pub fn emit_makefile(plan: &BuildPlan) -> String {
    let mut out = String::new();
    out.push_str("# Generated by cpak. Do not edit by hand.\n\n");
    out.push_str(&format!("CC := {}\n", plan.compiler));
    out.push_str(&format!("CFLAGS := {}\n", plan.compile_flags.join(" ")));
    out.push_str(&format!("LDFLAGS := {}\n", plan.link_flags.join(" ")));
    out.push_str(&format!("TARGET := {}\n\n", plan.target_filename()));

    let objects: Vec<PathBuf> = plan.sources.iter().map(|s| plan.object_path(s)).collect();
    let object_list = objects
        .iter()
        .map(|o| o.display().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!("OBJS := {object_list}\n\n"));

    out.push_str("all: $(TARGET)\n\n");

    for (source, object) in plan.sources.iter().zip(&objects) {
        out.push_str(&format!("{}: {}\n", object.display(), source.display()));
        out.push_str("\t@mkdir -p $(dir $@)\n");
        out.push_str("\t$(CC) $(CFLAGS) -c $< -o $@\n\n");
    }

    out.push_str("$(TARGET): $(OBJS)\n");
    match plan.kind {
        ProjectKind::Bin => {
            out.push_str("\t$(CC) $(OBJS) $(LDFLAGS) -o $(TARGET)\n\n");
        }
        ProjectKind::StaticLib => {
            out.push_str("\tar rcs $(TARGET) $(OBJS)\n\n");
        }
        ProjectKind::SharedLib => {
            out.push_str(&format!(
                "\t$(CC) {} $(OBJS) $(LDFLAGS) -o $(TARGET)\n\n",
                options::shared_lib_flag()
            ));
        }
    }

    out.push_str("clean:\n\trm -rf obj $(TARGET)\n\n");
    out.push_str(".PHONY: all clean\n");
    out
}
