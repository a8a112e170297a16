//! Integration tests for `qapush push` argument and target validation.
//!
//! Each case fails before the pull starts, so no git, build tool, or host is
//! needed.

use predicates::prelude::*;

use crate::support::Project;

#[test]
fn test_push_without_host_fails_fast() {
    let project = Project::new("");
    project
        .cmd()
        .arg("push")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing setting: remote.host"))
        .stdout(predicate::str::contains("Pulling latest from git").not());
}

#[test]
fn test_push_without_user_fails_fast() {
    let project = Project::new("remote:\n  host: qa.example.com\n");
    project
        .cmd()
        .arg("push")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing setting: remote.user"));
}

#[test]
fn test_push_without_key_env_names_the_variable() {
    let project = Project::new("remote:\n  host: qa.example.com\n  user: ec2-user\n");
    project
        .cmd()
        .arg("push")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("OREGON"));
}

#[test]
fn test_push_honours_custom_key_env() {
    let project = Project::new(
        "remote:\n  host: qa.example.com\n  user: ec2-user\n  key_env: QA_KEY_PAIR\n",
    );
    project
        .cmd()
        .env_remove("QA_KEY_PAIR")
        .arg("push")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("QA_KEY_PAIR"));
}
