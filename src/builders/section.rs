use std::path::Path;

use crate::builders::storage::OutputStorage;
use crate::core::error::Result;

/// Marker line opening the generated block of a `.includes` file.
pub const TAG_BEGIN: &str = "# QTC_PROJECT_BEGIN";
/// Marker line closing the generated block of a `.includes` file.
pub const TAG_END: &str = "# QTC_PROJECT_END";

/// Builds the tagged block `begin\n<body>\nend`, trimmed of surrounding
/// whitespace.
pub fn build_section(begin: &str, end: &str, body: &[String]) -> String {
    format!("{begin}\n{}\n{end}", body.join("\n"))
        .trim()
        .to_string()
}

/// Replaces the tagged block inside `existing` and returns the new file
/// content, always ending in exactly one `\n`.
///
/// Only the first `begin` and the first `end` after it are considered. Text
/// before and after that span is kept verbatim (apart from whitespace at the
/// very start and end of the file). Without a `begin` marker the whole
/// content is replaced. A `begin` with no `end` after it is treated as a
/// block running to the end of the file.
pub fn splice_section(existing: &str, begin: &str, end: &str, body: &[String]) -> String {
    let existing = existing.trim();
    let section = build_section(begin, end, body);

    let merged = match existing.find(begin) {
        Some(start) => {
            let search_from = start + begin.len();
            let stop = existing[search_from..]
                .find(end)
                .map_or(existing.len(), |offset| search_from + offset + end.len());
            format!("{}{section}{}", &existing[..start], &existing[stop..])
        }
        None => section,
    };

    format!("{merged}\n")
}

/// Merges `body` into the tagged block of the file at `path`.
///
/// Running it twice with the same body yields identical bytes.
pub fn merge_section<S>(
    storage: &mut S,
    path: &Path,
    begin: &str,
    end: &str,
    body: &[String],
) -> Result<()>
where
    S: OutputStorage + ?Sized,
{
    let existing = storage.read_existing(path)?.unwrap_or_default();
    let had_section = existing.contains(begin);
    let merged = splice_section(&existing, begin, end, body);
    tracing::debug!(path = %path.display(), had_section, "merging tagged section");
    storage.write(path, &merged)
}
