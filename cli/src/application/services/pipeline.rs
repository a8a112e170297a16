//! Application service: the end-to-end flows.
//!
//! Both flows are strictly sequential: sync → build → check → deploy. The
//! first failing step ends the run and no later step is attempted.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, Confirmer, FileHasher, ProgressReporter, ProjectFiles, RemoteHost,
};
use crate::application::services::build::build_artifact;
use crate::application::services::config_check::check_run_mode;
use crate::application::services::remote_deploy::{DeployOptions, deploy};
use crate::application::services::source_sync::{GitCredentials, SyncOptions, sync_source};
use crate::domain::config::QapushConfig;
use crate::domain::error::AbortError;
use crate::domain::pull::PullOutcome;

/// What the build-only flow did.
#[derive(Debug)]
pub struct BuildReport {
    pub pull: PullOutcome,
    pub built: bool,
}

fn sync_options<'a>(cfg: &'a QapushConfig, credentials: GitCredentials<'a>) -> SyncOptions<'a> {
    SyncOptions {
        root: &cfg.project.root,
        credentials,
        timeout: Duration::from_secs(cfg.source.pull_timeout_secs),
    }
}

/// Pull, then build only if new changes arrived (or `force` is set).
///
/// # Errors
///
/// Propagates the first failing step's error.
pub async fn build_from_git(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    cfg: &QapushConfig,
    credentials: GitCredentials<'_>,
    force: bool,
) -> Result<BuildReport> {
    let pull = sync_source(runner, reporter, &sync_options(cfg, credentials)).await?;

    let built = pull.has_new_changes() || force;
    if built {
        build_artifact(runner, reporter, &cfg.project, &cfg.build).await?;
    } else {
        reporter.step("Nothing new to build (use --force to build anyway)");
    }
    Ok(BuildReport { pull, built })
}

/// Local and remote collaborators of the push flow.
pub struct PushDeps<'a, R, H, F, P, C> {
    pub runner: &'a R,
    pub host: &'a H,
    pub files: &'a F,
    pub reporter: &'a P,
    pub confirmer: &'a C,
}

/// Pull, build, verify the run mode, then deploy to the QA host.
///
/// # Errors
///
/// Propagates the first failing step's error. Declining the confirmation
/// prompt yields [`AbortError::Declined`].
pub async fn push_to_qa<R, H, F, P, C>(
    deps: &PushDeps<'_, R, H, F, P, C>,
    cfg: &QapushConfig,
    credentials: GitCredentials<'_>,
) -> Result<()>
where
    R: CommandRunner,
    H: RemoteHost,
    F: ProjectFiles + FileHasher,
    P: ProgressReporter,
    C: Confirmer,
{
    let PushDeps {
        runner,
        host,
        files,
        reporter,
        confirmer,
    } = deps;

    sync_source(*runner, *reporter, &sync_options(cfg, credentials)).await?;
    build_artifact(*runner, *reporter, &cfg.project, &cfg.build).await?;
    check_run_mode(*files, *reporter, &cfg.project, &cfg.run_mode)?;

    let prompt = format!(
        "Deploy to {} and restart {}?",
        host.host(),
        cfg.remote.service
    );
    if !confirmer.confirm(&prompt, true)? {
        return Err(AbortError::Declined.into());
    }

    let artifact = cfg.project.artifact_path();
    deploy(
        *host,
        *files,
        *reporter,
        &DeployOptions {
            artifact: &artifact,
            remote: &cfg.remote,
            readiness: &cfg.readiness,
        },
    )
    .await
}
