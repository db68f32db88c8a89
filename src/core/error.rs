use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating or updating a generic project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No `*.files` manifest in the working directory.
    #[error("No QtCreator generic project found in {}", .dir.display())]
    NoProject { dir: PathBuf },

    /// More than one `*.files` manifest in the working directory.
    #[error("Found more than one QtCreator generic project: {}", format_candidates(.candidates))]
    MultipleProjects { candidates: Vec<PathBuf> },

    /// `create` was invoked where a project already lives.
    #[error("A QtCreator generic project already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// The traversal root does not exist.
    #[error("Path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A path exists but cannot be used the way it was asked to be.
    #[error("Invalid argument {}: {reason}", .path.display())]
    InvalidArgument { path: PathBuf, reason: String },

    /// A gitignore rule could not be turned into a matcher.
    #[error("Invalid ignore pattern '{pattern}' from {origin}")]
    InvalidPattern {
        pattern: String,
        origin: String,
        #[source]
        source: ignore::Error,
    },

    /// The settings file exists but is not valid TOML for `Settings`.
    #[error("Failed to parse settings file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Any read or write failure on a project file.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProjectError::NoProject { .. } => 2,
            ProjectError::MultipleProjects { .. } => 3,
            ProjectError::AlreadyExists { .. } => 4,
            _ => 1,
        }
    }
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ProjectError>;
