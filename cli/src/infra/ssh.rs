//! OpenSSH-backed implementation of the `RemoteHost` and `RemoteShell` ports.
//!
//! Every remote command is a separate non-interactive `ssh` invocation, so
//! each one yields its own exit code, stdout, and stderr.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, RemoteHost, RemoteOutput, RemoteShell};
use crate::domain::config::RemoteTarget;
use crate::domain::error::DeployError;

/// Options shared by `ssh` and `scp`. Host keys are learned on first contact.
const COMMON_OPTS: &[&str] = &[
    "-o",
    "BatchMode=yes",
    "-o",
    "StrictHostKeyChecking=accept-new",
    "-o",
    "ConnectTimeout=15",
];

/// The QA host reached through the `ssh` and `scp` binaries.
///
/// Copies and remote commands run without a local deadline: a large war on a
/// slow link or a slow service stop must not be cut off. Only `ConnectTimeout`
/// bounds them.
pub struct OpenSshHost<R> {
    runner: R,
    target: RemoteTarget,
}

impl<R: CommandRunner + Clone> OpenSshHost<R> {
    #[must_use]
    pub fn new(runner: R, target: RemoteTarget) -> Self {
        Self { runner, target }
    }
}

fn base_args(target: &RemoteTarget) -> Vec<String> {
    let mut args = vec!["-i".to_string(), target.key_path.to_string_lossy().into_owned()];
    args.extend(COMMON_OPTS.iter().map(|s| (*s).to_string()));
    args
}

impl<R: CommandRunner + Clone> RemoteHost for OpenSshHost<R> {
    type Session = OpenSshSession<R>;

    fn host(&self) -> &str {
        &self.target.host
    }

    async fn upload(&self, local: &Path, remote: &str) -> Result<RemoteOutput> {
        let mut args = base_args(&self.target);
        args.push(local.to_string_lossy().into_owned());
        args.push(format!("{}:{remote}", self.target.destination()));
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self
            .runner
            .run("scp", &arg_refs)
            .await
            .context("running scp")?;
        Ok(RemoteOutput::from_output(&output))
    }

    async fn open_session(&self) -> Result<Self::Session> {
        let session = OpenSshSession {
            runner: self.runner.clone(),
            target: self.target.clone(),
        };
        let check = session.exec("true").await?;
        if !check.success() {
            return Err(DeployError::SessionFailed {
                host: self.target.host.clone(),
                code: check.code,
                stderr: check.stderr.trim().to_string(),
            }
            .into());
        }
        tracing::info!(host = %self.target.host, "remote session open");
        Ok(session)
    }
}

/// An authenticated session; each `exec` is one `ssh` round trip.
pub struct OpenSshSession<R> {
    runner: R,
    target: RemoteTarget,
}

impl<R: CommandRunner> RemoteShell for OpenSshSession<R> {
    async fn exec(&self, command: &str) -> Result<RemoteOutput> {
        let mut args = base_args(&self.target);
        args.push(self.target.destination());
        args.push(command.to_string());
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self
            .runner
            .run("ssh", &arg_refs)
            .await
            .context("running ssh")?;
        let out = RemoteOutput::from_output(&output);
        tracing::debug!(command, code = out.code, "remote command finished");
        Ok(out)
    }
}
