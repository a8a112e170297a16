//! Application service: run-mode check on the application properties file.

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, ProjectFiles};
use crate::domain::config::{ProjectConfig, RunModeConfig};
use crate::domain::run_mode::{self, RunModeStatus};

/// Assert that the properties file declares the expected run mode.
///
/// Runs before any deployment action so a mismatch leaves the QA host untouched.
///
/// # Errors
///
/// Returns an [`crate::domain::AbortError`] on a mismatch (or a missing key
/// when `require_key` is set), or a plain error if the file cannot be read.
pub fn check_run_mode(
    files: &impl ProjectFiles,
    reporter: &impl ProgressReporter,
    project: &ProjectConfig,
    cfg: &RunModeConfig,
) -> Result<RunModeStatus> {
    reporter.step("Checking configuration...");

    let path = project.properties_path();
    let contents = files
        .read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    let status = run_mode::scan(&contents, cfg);
    run_mode::enforce(&status, cfg)?;

    match &status {
        RunModeStatus::Confirmed(_) => reporter.success(&format!(
            "Checked config file and confirmed that run mode is {}",
            cfg.expected.to_uppercase()
        )),
        RunModeStatus::Missing => reporter.warn(&format!(
            "{} has no '{}' line; run mode not verified",
            path.display(),
            cfg.key
        )),
        RunModeStatus::Mismatch(_) => {}
    }
    Ok(status)
}
