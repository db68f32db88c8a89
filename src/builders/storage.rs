use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::{ProjectError, Result};

/// Reads a file, treating a missing file as `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ProjectError::io(path, err)),
    }
}

/// The seam through which generated project files are read back and written.
///
/// The manifest writer and the section merger only talk to this trait, so a
/// dry run can swap the disk out for an in-memory recorder.
pub trait OutputStorage {
    /// Current content of `path`, or `None` if it does not exist.
    fn read_existing(&self, path: &Path) -> Result<Option<String>>;
    /// Replaces the whole content of `path`.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// Writes straight to the filesystem.
#[derive(Debug, Default)]
pub struct DiskStorage;

impl DiskStorage {
    pub fn new() -> Self {
        Self
    }
}

impl OutputStorage for DiskStorage {
    fn read_existing(&self, path: &Path) -> Result<Option<String>> {
        read_optional(path)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|err| ProjectError::io(path, err))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}

/// Reads from disk but keeps every write in memory.
///
/// Later reads of a path see the last recorded write, so a dry run behaves
/// exactly like a real one without touching the project.
#[derive(Debug, Default)]
pub struct DryRunStorage {
    writes: Vec<(PathBuf, String)>,
}

impl DryRunStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded writes, in the order they happened.
    pub fn writes(&self) -> &[(PathBuf, String)] {
        &self.writes
    }
}

impl OutputStorage for DryRunStorage {
    fn read_existing(&self, path: &Path) -> Result<Option<String>> {
        match self.writes.iter().rev().find(|(written, _)| written == path) {
            Some((_, content)) => Ok(Some(content.clone())),
            None => read_optional(path),
        }
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.writes.push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}
