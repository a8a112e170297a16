//! Integration tests for `qapush check` against real properties files.

use predicates::prelude::*;

use crate::support::Project;

#[test]
fn test_check_qa_passes() {
    let project = Project::new("");
    project.write_properties("db.host=localhost\nblahgua.run.mode=QA\n");
    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Checked config file and confirmed that run mode is QA",
        ));
}

#[test]
fn test_check_production_aborts_with_one() {
    let project = Project::new("");
    project.write_properties("blahgua.run.mode=production\n");
    project
        .cmd()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not set for qa release!"))
        .stderr(predicate::str::contains(
            "Change line 'blahgua.run.mode=production' to 'blahgua.run.mode=qa'",
        ));
}

#[test]
fn test_check_missing_key_passes() {
    let project = Project::new("");
    project.write_properties("db.host=localhost\n");
    project.cmd().arg("check").assert().success();
}

#[test]
fn test_check_missing_key_fails_when_required() {
    let project = Project::new("run_mode:\n  require_key: true\n");
    project.write_properties("db.host=localhost\n");
    project
        .cmd()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("has no 'blahgua.run.mode' line"));
}

#[test]
fn test_check_custom_expected_mode() {
    let project = Project::new("run_mode:\n  expected: staging\n");
    project.write_properties("blahgua.run.mode=staging\n");
    project.cmd().arg("check").assert().success();
}

#[test]
fn test_check_without_properties_file_fails_with_two() {
    let project = Project::new("");
    project
        .cmd()
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("blahguaConfiguration.properties"));
}
