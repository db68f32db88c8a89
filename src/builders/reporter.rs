use std::path::PathBuf;

/// Summary of one `update` run, handed from the `UpdateEngine` to a reporter.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    /// Project name `N`.
    pub project: String,
    /// Paths written to `N.files`.
    pub files: Vec<String>,
    /// Paths written into the tagged section of `N.includes`.
    pub include_dirs: Vec<String>,
    /// Set when nothing was written to disk.
    pub dry_run: bool,
    /// Contents that would have been written, only filled for dry runs.
    pub pending_writes: Vec<(PathBuf, String)>,
    /// Rule problems found by the validator.
    pub warnings: Vec<String>,
}

pub trait StatusReporter {
    fn report(&self, report: &UpdateReport);
}

/// Prints the report to standard output.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    /// With `verbose`, every collected path is listed as well.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Builds the text that `report` prints.
    pub fn format_report(&self, report: &UpdateReport) -> String {
        let mut out = String::new();
        let verb = if report.dry_run { "Would update" } else { "✓ Updated" };
        out.push_str(&format!("{verb} project: {}\n", report.project));
        out.push_str(&format!("  Files: {}\n", report.files.len()));
        out.push_str(&format!("  Include directories: {}\n", report.include_dirs.len()));

        if !report.warnings.is_empty() {
            out.push_str(&format!("⚠️  {} ignore rule warning(s):\n", report.warnings.len()));
            for warning in &report.warnings {
                out.push_str(&format!("  - {warning}\n"));
            }
        }

        if self.verbose {
            for file in &report.files {
                out.push_str(&format!("  📄 {file}\n"));
            }
            for dir in &report.include_dirs {
                out.push_str(&format!("  📁 {dir}\n"));
            }
        }

        for (path, content) in &report.pending_writes {
            out.push_str(&format!("\n--- {} ---\n", path.display()));
            out.push_str(content);
        }
        out
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, report: &UpdateReport) {
        print!("{}", self.format_report(report));
    }
}
