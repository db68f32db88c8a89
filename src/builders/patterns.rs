use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::PathBuf;

use crate::builders::importer::IgnoreRuleSet;
use crate::core::error::{ProjectError, Result};

/// The `PatternMatcher` trait is the single capability the tree walker needs:
/// given a path relative to the project root and the kind of entry it names,
/// decide whether the entry is excluded.
///
/// Keeping the walker generic over this trait means it never knows how rules
/// were sourced or compiled.
pub trait PatternMatcher {
    /// Returns `true` when `relative_path` is excluded by the rules.
    ///
    /// # Arguments
    /// * `relative_path`: A `/`-separated path relative to the project root.
    /// * `is_dir`: Whether the path names a directory.
    fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool;
}

/// An ordered, compiled set of gitignore rules.
///
/// The last rule that matches a path decides its fate; a path no rule matches
/// is kept. A path below an excluded directory stays excluded whatever later
/// rules say about the path itself. The value is immutable once built and can
/// be shared freely.
#[derive(Debug, Clone)]
pub struct IgnoreSpec {
    gitignore: Gitignore,
}

impl IgnoreSpec {
    /// Compiles bare rule lines, in order.
    pub fn compile<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = new_builder();
        for (index, line) in lines.into_iter().enumerate() {
            add_rule(&mut builder, line.as_ref(), format!("rule {}", index + 1))?;
        }
        Self::finish(builder)
    }

    /// Compiles a rule set, reporting the rule's origin if one fails.
    pub fn from_rule_set(rules: &IgnoreRuleSet) -> Result<Self> {
        let mut builder = new_builder();
        for rule in rules.lines() {
            add_rule(&mut builder, &rule.text, rule.location())?;
        }
        Self::finish(builder)
    }

    fn finish(builder: GitignoreBuilder) -> Result<Self> {
        let gitignore = builder
            .build()
            .map_err(|source| ProjectError::InvalidPattern {
                pattern: String::new(),
                origin: "compiled rule set".to_string(),
                source,
            })?;
        Ok(Self { gitignore })
    }

    /// Number of effective rules; comments and blank lines do not count.
    pub fn len(&self) -> usize {
        self.gitignore.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gitignore.is_empty()
    }

    /// Whether a rule matches `path` itself, without looking at its parents.
    fn matches_own(&self, path: &str, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}

impl PatternMatcher for IgnoreSpec {
    fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        let path = normalize(relative_path);
        if path.is_empty() {
            return false;
        }
        // An excluded directory cannot have re-included contents, so the
        // outermost excluded ancestor settles the question.
        let excluded_parent = path
            .match_indices('/')
            .any(|(end, _)| self.matches_own(&path[..end], true));
        excluded_parent || self.matches_own(path, is_dir)
    }
}

/// Escapes a literal file name so it can be embedded in a rule.
pub fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for (index, c) in literal.chars().enumerate() {
        let leading = index == 0 && (c == '!' || c == '#');
        if leading || matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn new_builder() -> GitignoreBuilder {
    let mut builder = GitignoreBuilder::new("");
    builder.allow_unclosed_class(true);
    builder
}

fn add_rule(builder: &mut GitignoreBuilder, line: &str, origin: String) -> Result<()> {
    let trimmed = trim_unescaped_trailing_spaces(line);
    builder
        .add_line(Some(PathBuf::from(&origin)), trimmed)
        .map_err(|source| ProjectError::InvalidPattern {
            pattern: line.to_string(),
            origin,
            source,
        })?;
    Ok(())
}

fn normalize(path: &str) -> &str {
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.trim_matches('/')
}

/// Drops trailing spaces, keeping one only when it is escaped by an odd run
/// of backslashes (`foo\ ` keeps it, `foo\\ ` does not).
fn trim_unescaped_trailing_spaces(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(lines: &[&str]) -> IgnoreSpec {
        IgnoreSpec::compile(lines).unwrap()
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let spec = spec(&["", "# a comment", "   ", "*.o"]);
        assert_eq!(spec.len(), 1);
        assert!(spec.is_ignored("main.o", false));
        assert!(!spec.is_ignored("# a comment", false));
    }

    #[test]
    fn test_unanchored_name_matches_at_any_depth() {
        let spec = spec(&["CMakeFiles"]);
        assert!(spec.is_ignored("CMakeFiles", true));
        assert!(spec.is_ignored("build/CMakeFiles", true));
        assert!(spec.is_ignored("build/CMakeFiles/x.txt", false));
        assert!(!spec.is_ignored("build/CMakeFilesX", true));
    }

    #[test]
    fn test_anchored_pattern_only_matches_from_root() {
        let spec = spec(&["/build", "docs/out"]);
        assert!(spec.is_ignored("build", true));
        assert!(!spec.is_ignored("src/build", true));
        assert!(spec.is_ignored("docs/out/index.html", false));
        assert!(!spec.is_ignored("site/docs/out", true));
    }

    #[test]
    fn test_directory_only_pattern() {
        let spec = spec(&["logs/"]);
        assert!(spec.is_ignored("logs", true));
        assert!(!spec.is_ignored("logs", false));
        assert!(spec.is_ignored("a/logs/today.txt", false));
        // The nearest `logs` is a file, but an outer `logs` directory matches.
        assert!(spec.is_ignored("logs/x/logs", false));
    }

    #[test]
    fn test_last_match_wins_with_negation() {
        let spec = spec(&["*.log", "!keep.log"]);
        assert!(spec.is_ignored("debug.log", false));
        assert!(!spec.is_ignored("keep.log", false));

        let spec_reversed = IgnoreSpec::compile(["!keep.log", "*.log"]).unwrap();
        assert!(spec_reversed.is_ignored("keep.log", false));
    }

    #[test]
    fn test_negation_only_reincludes_the_named_path() {
        let spec = spec(&["*.txt", "!foo"]);
        assert!(spec.is_ignored("foo/a.txt", false));
        assert!(!spec.is_ignored("foo", true));
    }

    #[test]
    fn test_allowlist_idiom_keeps_unlisted_files_ignored() {
        let spec = spec(&["*", "!*/", "!*.cpp"]);
        assert!(spec.is_ignored("src/a.o", false));
        assert!(spec.is_ignored("a.o", false));
        assert!(!spec.is_ignored("src", true));
        assert!(!spec.is_ignored("src/a.cpp", false));
    }

    #[test]
    fn test_negation_cannot_reach_inside_excluded_directory() {
        let spec = spec(&["vendor/", "!keep.cpp"]);
        assert!(!spec.is_ignored("keep.cpp", false));
        assert!(spec.is_ignored("vendor/keep.cpp", false));
        assert!(spec.is_ignored("vendor/deep/keep.cpp", false));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let spec = spec(&["src/*.cpp"]);
        assert!(spec.is_ignored("src/a.cpp", false));
        assert!(!spec.is_ignored("src/sub/a.cpp", false));
    }

    #[test]
    fn test_double_star_forms() {
        let leading = spec(&["**/gen"]);
        assert!(leading.is_ignored("gen", true));
        assert!(leading.is_ignored("a/b/gen", true));

        let trailing = spec(&["third_party/**"]);
        assert!(trailing.is_ignored("third_party/zlib/zlib.h", false));
        assert!(!trailing.is_ignored("third_party", true));

        let middle = spec(&["a/**/b"]);
        assert!(middle.is_ignored("a/b", true));
        assert!(middle.is_ignored("a/x/y/b", true));
        assert!(!middle.is_ignored("c/a/b", true));
    }

    #[test]
    fn test_question_mark_and_character_classes() {
        let spec = spec(&["file?.txt", "[Dd]ebug", "v[!0-9]"]);
        assert!(spec.is_ignored("file1.txt", false));
        assert!(!spec.is_ignored("file12.txt", false));
        assert!(spec.is_ignored("Debug", true));
        assert!(spec.is_ignored("debug", true));
        assert!(spec.is_ignored("vx", false));
        assert!(!spec.is_ignored("v1", false));
    }

    #[test]
    fn test_escapes() {
        let spec = spec(&["\\#hash", "\\!bang", "lit\\*"]);
        assert!(spec.is_ignored("#hash", false));
        assert!(spec.is_ignored("!bang", false));
        assert!(spec.is_ignored("lit*", false));
        assert!(!spec.is_ignored("litx", false));
    }

    #[test]
    fn test_trailing_spaces_trimmed_unless_escaped() {
        let spec = spec(&["name   ", "space\\ "]);
        assert!(spec.is_ignored("name", false));
        assert!(spec.is_ignored("space ", false));
    }

    #[test]
    fn test_trailing_space_after_escaped_backslash_is_trimmed() {
        assert_eq!(trim_unescaped_trailing_spaces("foo\\\\ "), "foo\\\\");
        assert_eq!(trim_unescaped_trailing_spaces("foo\\\\\\ "), "foo\\\\\\ ");
        assert_eq!(trim_unescaped_trailing_spaces("foo\\   "), "foo\\ ");

        let spec = spec(&["foo\\\\ "]);
        assert!(spec.is_ignored("foo\\", false));
        assert!(!spec.is_ignored("foo\\ ", false));
    }

    #[test]
    fn test_invalid_rule_reports_its_origin() {
        let err = IgnoreSpec::compile(["*.o", "a/{b"]).unwrap_err();
        match err {
            ProjectError::InvalidPattern { pattern, origin, .. } => {
                assert_eq!(pattern, "a/{b");
                assert_eq!(origin, "rule 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_escape_round_trips_literal_names() {
        let spec = IgnoreSpec::compile([format!("/{}", escape("my[app]*.files"))]).unwrap();
        assert!(spec.is_ignored("my[app]*.files", false));
        assert!(!spec.is_ignored("mya.files", false));
    }

    #[test]
    fn test_paths_are_normalized() {
        let spec = spec(&["build/"]);
        assert!(spec.is_ignored("./build/", true));
        assert!(!spec.is_ignored("", true));
    }
}
