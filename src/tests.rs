use crate::builders::scaffold::create_project_files;
use crate::builders::storage::DiskStorage;
use crate::core::config::{ConfigManager, ProjectLayout, Settings};
use crate::core::engine::UpdateEngine;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn setup_test_project() -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let project_path = dir.path().to_path_buf();
    create_project_files(&project_path, "demo").unwrap();
    (dir, project_path)
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn update(project_path: &Path) {
    let config_manager = ConfigManager::new(project_path).unwrap();
    let engine = UpdateEngine::new(&config_manager).unwrap();
    engine.run(&mut DiskStorage::new()).unwrap();
}

#[test]
fn test_create_then_update() {
    let (_dir, project_path) = setup_test_project();
    touch(&project_path, "src/main.cpp");
    touch(&project_path, "include/app/app.h");

    update(&project_path);

    let files = fs::read_to_string(project_path.join("demo.files")).unwrap();
    assert_eq!(files, "include/app/app.h\nsrc/main.cpp\n");

    let includes = fs::read_to_string(project_path.join("demo.includes")).unwrap();
    assert_eq!(
        includes,
        "# QTC_PROJECT_BEGIN\ninclude\ninclude/app\nsrc\n# QTC_PROJECT_END\n"
    );
}

#[test]
fn test_project_gitignore_is_applied() {
    let (_dir, project_path) = setup_test_project();
    touch(&project_path, "src/main.cpp");
    touch(&project_path, "src/main.o");
    touch(&project_path, "out/bin/app");
    fs::write(project_path.join("demo.gitignore"), "*.o\n/out/\n").unwrap();

    update(&project_path);

    let files = fs::read_to_string(project_path.join("demo.files")).unwrap();
    assert_eq!(files, "src/main.cpp\n");
}

#[test]
fn test_root_gitignore_negation_reincludes() {
    let (_dir, project_path) = setup_test_project();
    touch(&project_path, "logs/keep.log");
    touch(&project_path, "logs/drop.log");
    fs::write(project_path.join(".gitignore"), "*.log\n!keep.log\n").unwrap();

    update(&project_path);

    let files = fs::read_to_string(project_path.join("demo.files")).unwrap();
    assert_eq!(files, ".gitignore\nlogs/keep.log\n");
}

#[test]
fn test_builtins_win_over_user_negation() {
    let (_dir, project_path) = setup_test_project();
    touch(&project_path, ".vscode/settings.json");
    fs::write(project_path.join("demo.gitignore"), "!.vscode\n").unwrap();

    let layout = ProjectLayout::discover(&project_path).unwrap();
    let engine = UpdateEngine::with_settings(layout, Settings::default());
    let report = engine.run(&mut DiskStorage::new()).unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.warnings.len(), 1);
}
