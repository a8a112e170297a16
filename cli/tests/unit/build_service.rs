//! Unit tests for `build_artifact`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use qapush::app::{EXIT_ABORT, exit_code_for};
use qapush::application::services::build::build_artifact;
use qapush::domain::error::AbortError;

use crate::helpers::{Journal, MockRunner, PullScript, RecordingReporter, test_config, up_to_date_output};

#[tokio::test]
async fn test_build_streams_output_and_succeeds() {
    let cfg = test_config();
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(up_to_date_output()));
    let reporter = RecordingReporter::default();

    build_artifact(&runner, &reporter, &cfg.project, &cfg.build)
        .await
        .expect("build succeeds");

    assert_eq!(reporter.lines(), vec!["[INFO] BUILD SUCCESS".to_string()]);
    assert!(reporter.has("step:Building war..."));
    assert!(reporter.has("success:Build finished"));
}

#[tokio::test]
async fn test_build_uses_project_descriptor_and_goals() {
    let cfg = test_config();
    let journal = Journal::default();
    let runner = MockRunner::new(&journal, PullScript::Respond(up_to_date_output()));
    let reporter = RecordingReporter::default();

    build_artifact(&runner, &reporter, &cfg.project, &cfg.build)
        .await
        .expect("build succeeds");

    assert_eq!(
        *runner.build_args.borrow(),
        vec!["-f", "/srv/api/pom.xml", "clean", "package"]
    );
}

#[tokio::test]
async fn test_failed_build_is_an_abort() {
    let cfg = test_config();
    let journal = Journal::default();
    let runner =
        MockRunner::new(&journal, PullScript::Respond(up_to_date_output())).with_build_code(1);
    let reporter = RecordingReporter::default();

    let err = build_artifact(&runner, &reporter, &cfg.project, &cfg.build)
        .await
        .expect_err("build must fail");

    assert!(matches!(
        err.downcast_ref::<AbortError>(),
        Some(AbortError::BuildFailed { code: 1 })
    ));
    assert_eq!(exit_code_for(&err), EXIT_ABORT);
    assert!(!reporter.has("success:Build finished"));
}
