use anyhow::{Context, Result};
use std::path::{Component, Path};

use crate::builders::reporter::{ConsoleReporter, StatusReporter};
use crate::builders::scaffold;
use crate::builders::storage::{DiskStorage, DryRunStorage};
use crate::core::config::ConfigManager;
use crate::core::engine::UpdateEngine;

/// `create`: scaffold a new generic project in `dir`.
pub fn create_project(dir: &Path, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => scaffold::default_project_name(dir)?,
    };
    let written = scaffold::create_project_files(dir, &name)?;
    println!("✓ Created QtCreator generic project: {name}");
    for path in written {
        println!("  {}", path.display());
    }
    println!("Run 'qtc-project update' to fill in the file and include lists");
    Ok(())
}

/// `update`: refresh `N.files` and `N.includes` of the project in `dir`.
pub fn update_project(dir: &Path, dry_run: bool) -> Result<()> {
    let config_manager = ConfigManager::new(dir)?;
    let engine = UpdateEngine::new(&config_manager)?;
    let reporter = ConsoleReporter::new(engine.settings().verbose);

    let context = || format!("Failed to update project {}", engine.layout().name());
    let report = if dry_run {
        let mut storage = DryRunStorage::new();
        let mut report = engine.run(&mut storage).with_context(context)?;
        report.dry_run = true;
        report.pending_writes = storage.writes().to_vec();
        report
    } else {
        engine.run(&mut DiskStorage::new()).with_context(context)?
    };

    reporter.report(&report);
    Ok(())
}

/// Joins the normal components of a relative path with `/`, whatever the
/// platform separator.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
