use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builders::storage::read_optional;
use crate::core::error::{ProjectError, Result};

/// Optional per-project settings file, looked up in the project root.
pub const SETTINGS_FILE_NAME: &str = ".qtc-project.toml";

/// Settings read from `.qtc-project.toml`. Every field is optional.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Extra gitignore rules, applied after the project's gitignore files.
    pub extra_ignore: Vec<String>,
    /// List every collected path in the update report.
    pub verbose: bool,
}

/// The files that make up one generic project named `N` inside `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    name: String,
    root: PathBuf,
}

impl ProjectLayout {
    /// Extensions of the files Qt Creator reads for a generic project.
    pub const PROJECT_EXTENSIONS: [&'static str; 6] =
        ["files", "includes", "cflags", "cxxflags", "config", "creator"];

    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Finds the single `*.files` manifest directly inside `dir`.
    ///
    /// The project root is the canonicalized directory holding the manifest
    /// and the project name is the manifest's file stem.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut candidates = find_with_extension(dir, "files")?;
        match candidates.len() {
            0 => Err(ProjectError::NoProject {
                dir: dir.to_path_buf(),
            }),
            1 => {
                let manifest = candidates.remove(0);
                let name = manifest
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let parent = manifest.parent().unwrap_or(dir);
                let root = fs::canonicalize(parent).map_err(|err| ProjectError::io(parent, err))?;
                Ok(Self::new(root, name))
            }
            _ => Err(ProjectError::MultipleProjects { candidates }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>.<ext>`
    pub fn project_file(&self, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{ext}", self.name))
    }

    pub fn files_path(&self) -> PathBuf {
        self.project_file("files")
    }

    pub fn includes_path(&self) -> PathBuf {
        self.project_file("includes")
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.project_file("gitignore")
    }

    pub fn root_gitignore_path(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }
}

/// Lists regular files in `dir` (not recursive) with the given extension,
/// sorted by path.
pub(crate) fn find_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| ProjectError::io(dir, err))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ProjectError::io(dir, err))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

pub trait ConfigProvider {
    fn load_settings(&self) -> Result<Settings>;
    fn get_settings_path(&self) -> PathBuf;
}

/// Locates the project and loads its settings.
pub struct ConfigManager {
    layout: ProjectLayout,
}

impl ConfigManager {
    /// Discovers the project in `dir`.
    pub fn new(dir: &Path) -> Result<Self> {
        Ok(Self {
            layout: ProjectLayout::discover(dir)?,
        })
    }

    pub fn new_at(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }
}

impl ConfigProvider for ConfigManager {
    fn load_settings(&self) -> Result<Settings> {
        let path = self.get_settings_path();
        match read_optional(&path)? {
            Some(content) => {
                toml::from_str(&content).map_err(|source| ProjectError::Config { path, source })
            }
            None => Ok(Settings::default()),
        }
    }

    fn get_settings_path(&self) -> PathBuf {
        self.layout.settings_path()
    }
}
