use std::path::Path;

use crate::builders::storage::OutputStorage;
use crate::core::error::Result;

/// Renders the `.files` manifest: one path per line, each line terminated by
/// `\n`, in the order given.
pub fn render_manifest(files: &[String]) -> String {
    let mut content = String::with_capacity(files.iter().map(|f| f.len() + 1).sum());
    for file in files {
        content.push_str(file);
        content.push('\n');
    }
    content
}

/// Overwrites the manifest at `path`. Nothing of the previous content is kept.
pub fn write_manifest<S>(storage: &mut S, path: &Path, files: &[String]) -> Result<()>
where
    S: OutputStorage + ?Sized,
{
    storage.write(path, &render_manifest(files))
}
