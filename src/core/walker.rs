use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::builders::patterns::PatternMatcher;
use crate::core::error::{ProjectError, Result};
use crate::utils::to_slash_path;

/// What a walk collected, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    /// Kept files, relative to the root, `/`-separated.
    pub files: Vec<String>,
    /// Kept directories, relative to the root, `/`-separated. The root
    /// itself is never listed.
    pub include_dirs: Vec<String>,
}

/// Depth-first, parent-before-children traversal that asks a
/// [`PatternMatcher`] about every entry.
///
/// An ignored directory is pruned: it is not listed and nothing beneath it is
/// ever read. Entries of a directory are visited sorted by file name, so the
/// result only depends on the tree and the rules. Symlinks are not followed.
pub struct TreeWalker<'a, M: PatternMatcher + ?Sized> {
    matcher: &'a M,
}

impl<'a, M: PatternMatcher + ?Sized> TreeWalker<'a, M> {
    pub fn new(matcher: &'a M) -> Self {
        Self { matcher }
    }

    pub fn walk(&self, root: &Path) -> Result<WalkResult> {
        let metadata = fs::metadata(root).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ProjectError::NotFound {
                path: root.to_path_buf(),
            },
            _ => ProjectError::io(root, err),
        })?;
        if !metadata.is_dir() {
            return Err(ProjectError::InvalidArgument {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut result = WalkResult::default();
        let entries = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_prune(root, entry));

        for entry in entries {
            let entry = entry.map_err(|err| walk_error(root, err))?;
            let Some(relative) = relative_path(root, &entry) else {
                continue;
            };
            if entry.file_type().is_dir() {
                result.include_dirs.push(relative);
            } else {
                result.files.push(relative);
            }
        }

        info!(
            root = %root.display(),
            files = result.files.len(),
            dirs = result.include_dirs.len(),
            "walk finished"
        );
        Ok(result)
    }

    fn should_prune(&self, root: &Path, entry: &DirEntry) -> bool {
        let Some(relative) = relative_path(root, entry) else {
            return false;
        };
        let is_dir = entry.file_type().is_dir();
        let ignored = self.matcher.is_ignored(&relative, is_dir);
        if ignored && is_dir {
            debug!(dir = %relative, "pruned ignored directory");
        }
        ignored
    }
}

/// Root-relative, `/`-separated path of an entry. `None` for the root itself.
fn relative_path(root: &Path, entry: &DirEntry) -> Option<String> {
    let relative = entry.path().strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(to_slash_path(relative))
}

fn walk_error(root: &Path, err: walkdir::Error) -> ProjectError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    ProjectError::io(path, source)
}
