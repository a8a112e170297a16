//! `qapush build`: pull the latest source and build it.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::pipeline::build_from_git;
use crate::output::TerminalReporter;

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    /// Build even when the pull brought nothing new
    #[arg(long)]
    pub force: bool,
}

/// Run `qapush build`.
///
/// # Errors
///
/// Returns an error if the pull or the build fails.
pub async fn run(app: &AppContext, args: &BuildArgs) -> Result<()> {
    app.output
        .header(&format!("Building {}", app.config.project.root.display()));
    let reporter = TerminalReporter::new(&app.output);
    let password = app.git_password();
    let credentials = super::git_credentials(app, password.as_deref());

    let report = build_from_git(&app.runner, &reporter, &app.config, credentials, args.force).await?;
    if report.built {
        app.output.success("Done!");
    }
    Ok(())
}
