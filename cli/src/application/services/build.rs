//! Application service: artifact build use-case.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::config::{BuildConfig, ProjectConfig};
use crate::domain::error::AbortError;

/// Run the build tool against the project descriptor, echoing its output.
///
/// # Errors
///
/// Returns [`AbortError::BuildFailed`] when the build tool exits non-zero,
/// or a plain error if it cannot be spawned.
pub async fn build_artifact(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    project: &ProjectConfig,
    build: &BuildConfig,
) -> Result<()> {
    reporter.step("Building war...");

    let descriptor = project.descriptor_path();
    let descriptor = descriptor.to_string_lossy();
    let mut args: Vec<&str> = vec!["-f", descriptor.as_ref()];
    args.extend(build.goals.iter().map(String::as_str));

    let mut echo = |line: &str| reporter.line(line);
    let status = runner
        .run_streaming(&build.program, &args, &mut echo)
        .await
        .with_context(|| format!("running {}", build.program))?;

    if !status.success() {
        return Err(AbortError::BuildFailed {
            code: status.code().unwrap_or(-1),
        }
        .into());
    }
    reporter.success("Build finished");
    Ok(())
}
