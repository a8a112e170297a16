//! Unit tests for `check_run_mode`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use qapush::app::{EXIT_ABORT, EXIT_FAILURE, exit_code_for};
use qapush::application::services::config_check::check_run_mode;
use qapush::domain::error::AbortError;
use qapush::domain::run_mode::RunModeStatus;

use crate::helpers::{Journal, MockFiles, RecordingReporter, test_config};

#[test]
fn test_qa_run_mode_passes() {
    let cfg = test_config();
    let files = MockFiles::new(&Journal::default(), "db.host=localhost\nblahgua.run.mode=QA\n");
    let reporter = RecordingReporter::default();

    let status = check_run_mode(&files, &reporter, &cfg.project, &cfg.run_mode)
        .expect("QA passes");

    assert_eq!(status, RunModeStatus::Confirmed("QA".into()));
    assert!(reporter.has("success:Checked config file and confirmed that run mode is QA"));
}

#[test]
fn test_production_run_mode_aborts_with_remediation() {
    let cfg = test_config();
    let files = MockFiles::new(&Journal::default(), "blahgua.run.mode=production\n");
    let reporter = RecordingReporter::default();

    let err = check_run_mode(&files, &reporter, &cfg.project, &cfg.run_mode)
        .expect_err("production must abort");

    assert!(matches!(
        err.downcast_ref::<AbortError>(),
        Some(AbortError::RunModeMismatch { .. })
    ));
    assert_eq!(exit_code_for(&err), EXIT_ABORT);
    assert!(
        err.to_string()
            .contains("Change line 'blahgua.run.mode=production' to 'blahgua.run.mode=qa'")
    );
}

#[test]
fn test_missing_key_passes_with_warning() {
    let cfg = test_config();
    let files = MockFiles::new(&Journal::default(), "db.host=localhost\n");
    let reporter = RecordingReporter::default();

    let status = check_run_mode(&files, &reporter, &cfg.project, &cfg.run_mode)
        .expect("missing key passes by default");

    assert_eq!(status, RunModeStatus::Missing);
    assert_eq!(reporter.count_prefix("warn:"), 1);
}

#[test]
fn test_missing_key_aborts_when_required() {
    let mut cfg = test_config();
    cfg.run_mode.require_key = true;
    let files = MockFiles::new(&Journal::default(), "db.host=localhost\n");
    let reporter = RecordingReporter::default();

    let err = check_run_mode(&files, &reporter, &cfg.project, &cfg.run_mode)
        .expect_err("missing key must abort");

    assert!(matches!(
        err.downcast_ref::<AbortError>(),
        Some(AbortError::RunModeMissing { .. })
    ));
}

#[test]
fn test_unreadable_properties_file_is_a_failure() {
    let cfg = test_config();
    let mut files = MockFiles::new(&Journal::default(), "");
    files.properties = None;
    let reporter = RecordingReporter::default();

    let err = check_run_mode(&files, &reporter, &cfg.project, &cfg.run_mode)
        .expect_err("unreadable file must fail");

    assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    assert!(format!("{err:#}").contains("blahguaConfiguration.properties"));
}
