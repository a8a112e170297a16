//! Unit tests for `sync_source` against a scripted git.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::time::Duration;

use qapush::app::{EXIT_ABORT, EXIT_FAILURE, exit_code_for};
use qapush::application::services::source_sync::{GitCredentials, SyncOptions, sync_source};
use qapush::domain::error::AbortError;
use qapush::domain::pull::PullOutcome;

use crate::helpers::{
    Journal, MockRunner, PullScript, RecordingReporter, err_output, new_changes_output,
    up_to_date_output,
};

fn options(credentials: GitCredentials<'_>) -> SyncOptions<'_> {
    SyncOptions {
        root: Path::new("/srv/api"),
        credentials,
        timeout: Duration::from_secs(30),
    }
}

#[tokio::test]
async fn test_up_to_date_reports_all_up_to_date() {
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(up_to_date_output()));
    let reporter = RecordingReporter::default();

    let outcome = sync_source(&runner, &reporter, &options(GitCredentials::default()))
        .await
        .expect("pull succeeds");

    assert_eq!(
        outcome,
        PullOutcome::UpToDate {
            message: "Already up to date.".into()
        }
    );
    assert!(reporter.has("success:All up to date"));
    assert!(!reporter.has("success:New version fetched"));
}

#[tokio::test]
async fn test_progress_lines_are_echoed_until_blank_line() {
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(new_changes_output()));
    let reporter = RecordingReporter::default();

    let outcome = sync_source(&runner, &reporter, &options(GitCredentials::default()))
        .await
        .expect("pull succeeds");

    assert!(outcome.has_new_changes());
    let lines = reporter.lines();
    assert_eq!(lines.first().map(String::as_str), Some("remote: Counting objects: 5, done."));
    assert!(lines.iter().any(|l| l == "Fast-forward"));
    assert!(reporter.has("success:New version fetched"));
}

#[tokio::test]
async fn test_timeout_is_an_abort() {
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::TimeOut);
    let reporter = RecordingReporter::default();

    let err = sync_source(&runner, &reporter, &options(GitCredentials::default()))
        .await
        .expect_err("timeout must fail");

    assert!(matches!(
        err.downcast_ref::<AbortError>(),
        Some(AbortError::PullTimedOut { secs: 30 })
    ));
    assert_eq!(exit_code_for(&err), EXIT_ABORT);
    assert!(err.to_string().contains("Try again or build manually"));
}

#[tokio::test]
async fn test_git_failure_is_not_an_abort() {
    let journal = Journal::default();
    let runner = MockRunner::new(
        &journal,
        PullScript::Respond(err_output(1, b"fatal: not a git repository\n")),
    );
    let reporter = RecordingReporter::default();

    let err = sync_source(&runner, &reporter, &options(GitCredentials::default()))
        .await
        .expect_err("git failure must fail");

    assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    assert!(err.to_string().contains("not a git repository"));
}

#[tokio::test]
async fn test_pull_runs_in_project_root_with_prompts_disabled() {
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(up_to_date_output()));
    let reporter = RecordingReporter::default();

    sync_source(&runner, &reporter, &options(GitCredentials::default()))
        .await
        .expect("pull succeeds");

    let args = runner.pull_args.borrow();
    assert_eq!(args[..2], ["-C".to_string(), "/srv/api".to_string()]);
    assert_eq!(args[args.len() - 2..], ["pull".to_string(), "--progress".to_string()]);
    assert!(!args.iter().any(|a| a.starts_with("credential.helper=!")));
    assert!(
        runner
            .pull_envs
            .borrow()
            .contains(&("GIT_TERMINAL_PROMPT".into(), "0".into()))
    );
}

#[tokio::test]
async fn test_password_travels_in_environment_not_arguments() {
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(up_to_date_output()));
    let reporter = RecordingReporter::default();
    let credentials = GitCredentials {
        username: Some("deployer"),
        password: Some("hunter2-very-secret"),
    };

    sync_source(&runner, &reporter, &options(credentials))
        .await
        .expect("pull succeeds");

    let args = runner.pull_args.borrow();
    assert!(!args.iter().any(|a| a.contains("hunter2-very-secret")));
    assert!(args.iter().any(|a| a.starts_with("credential.helper=!")));
    let envs = runner.pull_envs.borrow();
    assert!(envs.contains(&("QAPUSH_GIT_PASSWORD".into(), "hunter2-very-secret".into())));
    assert!(envs.contains(&("QAPUSH_GIT_USERNAME".into(), "deployer".into())));
}
