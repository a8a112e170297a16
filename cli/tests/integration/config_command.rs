//! Integration tests for `qapush config`.

use predicates::prelude::*;

use crate::support::{Project, qapush};

#[test]
fn test_config_path_prints_explicit_path() {
    let project = Project::new("");
    project
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(project.config.display().to_string()));
}

#[test]
fn test_config_path_honours_env_var() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("elsewhere.yaml");
    qapush()
        .env("QAPUSH_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()))
        .stdout(predicate::str::contains("built-in defaults"));
}

#[test]
fn test_config_show_includes_defaults_and_file_values() {
    let project = Project::new("remote:\n  host: qa.example.com\n");
    project
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host: qa.example.com"))
        .stdout(predicate::str::contains("key: blahgua.run.mode"))
        .stdout(predicate::str::contains("service: tomcat7"));
}

#[test]
fn test_config_get_reads_one_setting() {
    let project = Project::new("remote:\n  host: qa.example.com\n");
    project
        .cmd()
        .args(["config", "get", "remote.host"])
        .assert()
        .success()
        .stdout("qa.example.com\n");
}

#[test]
fn test_config_get_username_from_env() {
    let project = Project::new("source:\n  username: from-file\n");
    project
        .cmd()
        .env("QAPUSH_GIT_USERNAME", "from-env")
        .args(["config", "get", "source.username"])
        .assert()
        .success()
        .stdout("from-env\n");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let project = Project::new("");
    project
        .cmd()
        .args(["config", "get", "remote.hostname"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown setting: remote.hostname"))
        .stderr(predicate::str::contains("remote.host"));
}
