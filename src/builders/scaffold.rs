use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{ProjectLayout, find_with_extension};
use crate::core::error::{ProjectError, Result};

const CREATOR_TEMPLATE: &str = "[General]\n";

const CONFIG_TEMPLATE: &str = r#"// Add predefined macros for your project here. For example:
// #define THE_ANSWER 42
"#;

const CFLAGS_TEMPLATE: &str = "-std=c17\n";

const CXXFLAGS_TEMPLATE: &str = "-std=c++17\n";

/// Template body for each project file, keyed by extension.
fn template_for(ext: &str) -> &'static str {
    match ext {
        "creator" => CREATOR_TEMPLATE,
        "config" => CONFIG_TEMPLATE,
        "cflags" => CFLAGS_TEMPLATE,
        "cxxflags" => CXXFLAGS_TEMPLATE,
        // `files` and `includes` are filled in by `update`.
        _ => "",
    }
}

/// Writes the six scaffold files of a new generic project named `name` into
/// `dir` and returns their paths.
///
/// Fails without writing anything if `dir` already holds a project: any
/// `*.files` or `*.creator` file, or any of the files about to be created.
pub fn create_project_files(dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let layout = ProjectLayout::new(dir, name);
    if let Some(existing) = find_existing_project(&layout)? {
        return Err(ProjectError::AlreadyExists { path: existing });
    }

    let mut written = Vec::with_capacity(ProjectLayout::PROJECT_EXTENSIONS.len());
    for ext in ProjectLayout::PROJECT_EXTENSIONS {
        let path = layout.project_file(ext);
        fs::write(&path, template_for(ext)).map_err(|err| ProjectError::io(&path, err))?;
        tracing::debug!(path = %path.display(), "created scaffold file");
        written.push(path);
    }
    Ok(written)
}

fn find_existing_project(layout: &ProjectLayout) -> Result<Option<PathBuf>> {
    for ext in ["files", "creator"] {
        if let Some(path) = find_with_extension(layout.root(), ext)?.into_iter().next() {
            return Ok(Some(path));
        }
    }
    Ok(ProjectLayout::PROJECT_EXTENSIONS
        .iter()
        .map(|ext| layout.project_file(ext))
        .find(|path| path.exists()))
}

/// Project name used when none is given: the directory's own name.
pub fn default_project_name(dir: &Path) -> Result<String> {
    let resolved = fs::canonicalize(dir).map_err(|err| ProjectError::io(dir, err))?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ProjectError::InvalidArgument {
            path: resolved.clone(),
            reason: "cannot derive a project name from this directory".to_string(),
        })
}
