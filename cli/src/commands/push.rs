//! `qapush push`: pull, build, check, and deploy to the QA server.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::pipeline::{PushDeps, push_to_qa};
use crate::infra::ssh::OpenSshHost;
use crate::output::TerminalReporter;

/// Run `qapush push`.
///
/// The remote target is resolved before anything runs, so a missing host or
/// key-pair fails fast instead of after a full build.
///
/// # Errors
///
/// Returns an error if any step of the pipeline fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let key_path = std::env::var_os(&app.config.remote.key_env).map(PathBuf::from);
    let target = app.config.remote.target(key_path.as_deref())?;
    app.output
        .header(&format!("Pushing to {} ({})", target.destination(), app.config.remote.service));
    let host = OpenSshHost::new(app.runner.clone(), target);

    let reporter = TerminalReporter::new(&app.output);
    let password = app.git_password();
    let credentials = super::git_credentials(app, password.as_deref());

    let deps = PushDeps {
        runner: &app.runner,
        host: &host,
        files: &app.fs,
        reporter: &reporter,
        confirmer: app,
    };
    push_to_qa(&deps, &app.config, credentials).await
}
