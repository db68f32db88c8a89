use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn qtc_project() -> Command {
    Command::cargo_bin("qtc-project").unwrap()
}

#[test]
fn test_update_without_project_exits_with_discovery_code() {
    let td = tempfile::tempdir().unwrap();
    qtc_project()
        .current_dir(td.path())
        .arg("update")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No QtCreator generic project found"));
}

#[test]
fn test_update_with_two_projects_exits_with_distinct_code() {
    let td = tempfile::tempdir().unwrap();
    fs::write(td.path().join("a.files"), "").unwrap();
    fs::write(td.path().join("b.files"), "").unwrap();

    qtc_project()
        .current_dir(td.path())
        .arg("update")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("more than one"));

    assert!(!td.path().join("a.includes").exists());
}

#[test]
fn test_create_twice_fails_second_time() {
    let td = tempfile::tempdir().unwrap();
    qtc_project()
        .args(["-C", td.path().to_str().unwrap(), "create", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created QtCreator generic project: demo"));

    qtc_project()
        .current_dir(td.path())
        .args(["create", "--name", "demo"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_create_then_update_dry_run_touches_nothing() {
    let td = tempfile::tempdir().unwrap();
    fs::create_dir(td.path().join("src")).unwrap();
    fs::write(td.path().join("src/main.cpp"), "int main() {}\n").unwrap();

    qtc_project()
        .current_dir(td.path())
        .args(["create", "--name", "demo"])
        .assert()
        .success();

    qtc_project()
        .current_dir(td.path())
        .args(["update", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update project: demo"))
        .stdout(predicate::str::contains("src/main.cpp"));

    assert_eq!(fs::read_to_string(td.path().join("demo.files")).unwrap(), "");

    qtc_project()
        .current_dir(td.path())
        .arg("update")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(td.path().join("demo.files")).unwrap(),
        "src/main.cpp\n"
    );
}
