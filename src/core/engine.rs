use tracing::{info, warn};

use crate::builders::importer::{FileRuleImporter, RuleImporter};
use crate::builders::manifest::write_manifest;
use crate::builders::patterns::IgnoreSpec;
use crate::builders::reporter::UpdateReport;
use crate::builders::section::{TAG_BEGIN, TAG_END, merge_section};
use crate::builders::storage::OutputStorage;
use crate::builders::validator::{RuleValidator, StandardValidator};
use crate::core::config::{ConfigManager, ConfigProvider, ProjectLayout, Settings};
use crate::core::error::Result;
use crate::core::walker::{TreeWalker, WalkResult};

/// Runs one `update`: gather rules, walk the tree, rewrite `N.files` and
/// merge `N.includes`.
pub struct UpdateEngine {
    layout: ProjectLayout,
    settings: Settings,
    importer: Box<dyn RuleImporter>,
}

impl UpdateEngine {
    pub fn new(config_manager: &ConfigManager) -> Result<Self> {
        let settings = config_manager.load_settings()?;
        Ok(Self::with_settings(config_manager.layout().clone(), settings))
    }

    pub fn with_settings(layout: ProjectLayout, settings: Settings) -> Self {
        Self {
            layout,
            settings,
            importer: Box::new(FileRuleImporter::new()),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compiles the rules and walks the project without writing anything.
    pub fn collect(&self) -> Result<(WalkResult, Vec<String>)> {
        let rules = self.importer.import_rules(&self.layout, &self.settings)?;
        let warnings = StandardValidator::new().validate_rules(&rules);
        for warning in &warnings {
            warn!("{warning}");
        }

        let spec = IgnoreSpec::from_rule_set(&rules)?;
        let walked = TreeWalker::new(&spec).walk(self.layout.root())?;
        Ok((walked, warnings))
    }

    /// Performs the update through `storage`.
    ///
    /// The manifest is written before the includes file is merged; if the
    /// merge fails the new manifest stays in place.
    pub fn run<S>(&self, storage: &mut S) -> Result<UpdateReport>
    where
        S: OutputStorage + ?Sized,
    {
        info!(project = %self.layout.name(), root = %self.layout.root().display(), "updating project");
        let (walked, warnings) = self.collect()?;

        write_manifest(storage, &self.layout.files_path(), &walked.files)?;
        merge_section(
            storage,
            &self.layout.includes_path(),
            TAG_BEGIN,
            TAG_END,
            &walked.include_dirs,
        )?;

        Ok(UpdateReport {
            project: self.layout.name().to_string(),
            files: walked.files,
            include_dirs: walked.include_dirs,
            warnings,
            ..UpdateReport::default()
        })
    }
}
