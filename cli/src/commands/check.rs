//! `qapush check`: verify the run mode without touching the QA host.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::config_check::check_run_mode;
use crate::output::TerminalReporter;

/// Run `qapush check`.
///
/// # Errors
///
/// Returns an error if the properties file cannot be read or declares the
/// wrong run mode.
pub fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    check_run_mode(&app.fs, &reporter, &app.config.project, &app.config.run_mode)?;
    Ok(())
}
