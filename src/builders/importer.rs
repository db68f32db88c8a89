use std::fmt;

use crate::builders::patterns;
use crate::builders::storage::read_optional;
use crate::core::config::{ProjectLayout, Settings};
use crate::core::error::Result;

/// Entries that are ignored in every project, whatever the rule files say.
///
/// They are appended after all other rules, so under last-match-wins a user
/// negation can never re-include them.
pub const BUILTIN_IGNORES: &[&str] = &[
    // version control
    ".git",
    ".svn",
    "CVS",
    ".hg",
    // build and tooling caches
    "CMakeFiles",
    ".clangd",
    ".cache/clangd",
    "__pycache__",
    "*.egg-info",
    ".eggs",
    // editor state
    ".vscode",
    ".idea",
];

/// Where a rule line came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    /// `.gitignore` in the project root.
    RootGitignore,
    /// `<name>.gitignore` next to the project files.
    ProjectGitignore(String),
    /// `extra_ignore` in `.qtc-project.toml`.
    Settings,
    /// Rules that keep the tool's own files out of the manifest.
    ProjectFiles,
    BuiltIn,
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOrigin::RootGitignore => write!(f, ".gitignore"),
            RuleOrigin::ProjectGitignore(name) => write!(f, "{name}.gitignore"),
            RuleOrigin::Settings => write!(f, "{}", crate::core::config::SETTINGS_FILE_NAME),
            RuleOrigin::ProjectFiles => write!(f, "project files"),
            RuleOrigin::BuiltIn => write!(f, "built-in rules"),
        }
    }
}

/// One raw gitignore line plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub text: String,
    pub origin: RuleOrigin,
    /// 1-based line number within its origin.
    pub line_number: usize,
}

impl RuleLine {
    /// `origin:line`, used in diagnostics.
    pub fn location(&self) -> String {
        format!("{}:{}", self.origin, self.line_number)
    }
}

/// The ordered rule lines of one run, before compilation.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    lines: Vec<RuleLine>,
}

impl IgnoreRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the lines of a rule file's content.
    pub fn push_source(&mut self, origin: RuleOrigin, content: &str) {
        self.extend(origin, content.lines());
    }

    /// Appends individual rules, numbering them from 1.
    pub fn extend<I, S>(&mut self, origin: RuleOrigin, rules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, text) in rules.into_iter().enumerate() {
            self.lines.push(RuleLine {
                text: text.into(),
                origin: origin.clone(),
                line_number: index + 1,
            });
        }
    }

    pub fn lines(&self) -> &[RuleLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A trait that defines how the ignore rules of a project are gathered.
pub trait RuleImporter {
    /// Builds the full ordered rule set for a project.
    ///
    /// # Arguments
    /// * `layout`: The discovered project.
    /// * `settings`: The project's settings, which may contribute extra rules.
    fn import_rules(&self, layout: &ProjectLayout, settings: &Settings) -> Result<IgnoreRuleSet>;
}

/// Reads rules from the project's gitignore files on disk.
///
/// Order: root `.gitignore`, `<name>.gitignore`, settings, project files,
/// built-ins. Missing files are skipped.
pub struct FileRuleImporter;

impl FileRuleImporter {
    pub fn new() -> Self {
        Self
    }

    /// Rules that hide the project's own files from the manifest.
    fn project_file_rules(layout: &ProjectLayout) -> Vec<String> {
        let name = patterns::escape(layout.name());
        let mut rules: Vec<String> = ProjectLayout::PROJECT_EXTENSIONS
            .iter()
            .map(|ext| format!("/{name}.{ext}"))
            .collect();
        rules.push(format!("/{name}.creator.user*"));
        rules.push(format!("/{name}.gitignore"));
        rules.push(format!("/{}", crate::core::config::SETTINGS_FILE_NAME));
        rules
    }
}

impl Default for FileRuleImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleImporter for FileRuleImporter {
    fn import_rules(&self, layout: &ProjectLayout, settings: &Settings) -> Result<IgnoreRuleSet> {
        let mut rules = IgnoreRuleSet::new();

        if let Some(content) = read_optional(&layout.root_gitignore_path())? {
            rules.push_source(RuleOrigin::RootGitignore, &content);
        }
        if let Some(content) = read_optional(&layout.gitignore_path())? {
            rules.push_source(RuleOrigin::ProjectGitignore(layout.name().to_string()), &content);
        }

        rules.extend(RuleOrigin::Settings, settings.extra_ignore.iter().cloned());
        rules.extend(RuleOrigin::ProjectFiles, Self::project_file_rules(layout));
        rules.extend(RuleOrigin::BuiltIn, BUILTIN_IGNORES.iter().copied());

        tracing::debug!(rules = rules.len(), "collected ignore rules");
        Ok(rules)
    }
}
