//! Application service: push the built artifact to the QA host.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! A failure partway through leaves the host as-is; the error names the
//! remote step that failed.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;

use crate::application::ports::{
    FileHasher, ProgressReporter, ProjectFiles, RemoteHost, RemoteOutput, RemoteShell,
};
use crate::domain::config::{ReadinessConfig, RemoteConfig};
use crate::domain::deploy::{self, DeployPlan, RemoteStep};
use crate::domain::error::{AbortError, DeployError};

pub struct DeployOptions<'a> {
    /// Local artifact produced by the build.
    pub artifact: &'a Path,
    pub remote: &'a RemoteConfig,
    pub readiness: &'a ReadinessConfig,
}

/// Copy the artifact, swap it into the application server, restart it, and
/// show the log tail.
///
/// # Errors
///
/// Returns a [`DeployError`] when the copy, session, or any remote command
/// fails, or [`AbortError::ServiceNotReady`] when the readiness check never
/// succeeds (after the log tail has been shown).
pub async fn deploy<H, F>(
    host: &H,
    files: &F,
    reporter: &impl ProgressReporter,
    opts: &DeployOptions<'_>,
) -> Result<()>
where
    H: RemoteHost,
    F: ProjectFiles + FileHasher,
{
    let plan = DeployPlan::new(opts.remote);
    let artifact = opts.artifact;

    if !files.exists(artifact) {
        return Err(DeployError::ArtifactMissing(artifact.display().to_string()).into());
    }

    let local_digest = if opts.remote.verify_digest {
        let digest = files
            .sha256_file(artifact)
            .with_context(|| format!("hashing {}", artifact.display()))?;
        reporter.step(&format!("Artifact sha256 {digest}"));
        Some(digest)
    } else {
        None
    };

    // Step 1: copy to the remote home directory.
    reporter.step(&format!(
        "Pushing {} to {}...",
        artifact.display(),
        host.host()
    ));
    let copied = host
        .upload(artifact, plan.staged_path())
        .await
        .context("copying artifact")?;
    if !copied.success() {
        return Err(DeployError::CopyFailed {
            host: host.host().to_string(),
            code: copied.code,
            stderr: copied.stderr.trim().to_string(),
        }
        .into());
    }

    // Step 2: open the session.
    let session = host.open_session().await?;

    if let Some(local) = local_digest {
        let out = run_step(&session, reporter, "Verifying copied artifact...", &plan.digest()).await?;
        let remote = deploy::parse_sha256sum(&out.stdout).unwrap_or_default();
        if remote != local {
            return Err(DeployError::DigestMismatch { local, remote }.into());
        }
    }

    // Steps 3-8: swap the artifact while the service is down.
    run_step(&session, reporter, "Stopping service...", &plan.stop()).await?;
    tokio::time::sleep(Duration::from_secs(opts.remote.quiesce_secs)).await;
    run_step(&session, reporter, "Removing current version from container...", &plan.clean()).await?;
    run_step(&session, reporter, "Copying new war to container...", &plan.install()).await?;
    run_step(&session, reporter, "Setting war ownership...", &plan.chown()).await?;
    run_step(&session, reporter, "Starting service...", &plan.start()).await?;

    // Step 9: wait for readiness.
    reporter.step(&format!(
        "Waiting up to {}s for the service to come up...",
        opts.readiness.timeout_secs
    ));
    let ready = wait_ready(&session, reporter, opts.readiness).await?;

    // Step 10: show the log tail whether or not the service came up, even
    // under `--quiet`.
    let tail = exec_step(&session, reporter, "Service log:", &plan.tail_log()).await?;
    for line in tail.stdout.lines() {
        reporter.show(line);
    }

    if !ready {
        return Err(AbortError::ServiceNotReady {
            waited_secs: opts.readiness.timeout_secs,
        }
        .into());
    }
    reporter.success("Done!");
    Ok(())
}

/// Run one remote step, echo its stdout as progress, and fail on a non-zero exit.
async fn run_step(
    session: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    label: &str,
    step: &RemoteStep,
) -> Result<RemoteOutput> {
    let out = exec_step(session, reporter, label, step).await?;
    for line in out.stdout.lines() {
        reporter.line(line);
    }
    Ok(out)
}

async fn exec_step(
    session: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    label: &str,
    step: &RemoteStep,
) -> Result<RemoteOutput> {
    reporter.step(label);
    tracing::debug!(step = step.name, command = %step.command, "remote step");
    let out = session
        .exec(&step.command)
        .await
        .with_context(|| format!("remote step '{}'", step.name))?;
    if !out.success() {
        return Err(DeployError::RemoteCommandFailed {
            step: step.name.to_string(),
            code: out.code,
            stderr: out.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(out)
}

/// Poll the readiness command until it succeeds or the timeout runs out.
///
/// Returns `false` on timeout. The check always runs at least once.
async fn wait_ready(
    session: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    cfg: &ReadinessConfig,
) -> Result<bool> {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    let interval = Duration::from_secs(cfg.interval_secs);
    let started = Instant::now();

    loop {
        let check = session
            .exec(&cfg.command)
            .await
            .context("readiness check")?;
        if check.success() {
            reporter.success("Service is up");
            return Ok(true);
        }
        let elapsed = started.elapsed();
        if elapsed >= timeout {
            reporter.warn("Service did not report ready");
            return Ok(false);
        }
        let remaining = timeout - elapsed;
        reporter.countdown(remaining.as_secs());
        tokio::time::sleep(interval.min(remaining)).await;
    }
}
