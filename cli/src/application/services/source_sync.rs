//! Application service: source sync use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::error::{AbortError, TimedOut};
use crate::domain::pull::{self, PullOutcome};

/// Child-only variables read by the inline credential helper.
pub const USERNAME_VAR: &str = "QAPUSH_GIT_USERNAME";
pub const PASSWORD_VAR: &str = "QAPUSH_GIT_PASSWORD";

/// Login for the source remote, resolved by the caller.
#[derive(Default)]
pub struct GitCredentials<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

pub struct SyncOptions<'a> {
    /// Working tree to pull into.
    pub root: &'a Path,
    pub credentials: GitCredentials<'a>,
    /// Longest stretch the pull may go without printing anything.
    pub timeout: Duration,
}

/// Credential helper that answers git's `get` requests from the environment.
///
/// Values stay in env vars on the child process; only variable names appear
/// in argv.
fn credential_helper(creds: &GitCredentials<'_>) -> Option<String> {
    let mut body = String::new();
    if creds.username.is_some() {
        body.push_str(&format!("echo \"username=${{{USERNAME_VAR}}}\"; "));
    }
    if creds.password.is_some() {
        body.push_str(&format!("echo \"password=${{{PASSWORD_VAR}}}\"; "));
    }
    (!body.is_empty()).then(|| format!("credential.helper=!f() {{ test \"$1\" = get || exit 0; {body}}}; f"))
}

/// Pull the latest source and report what happened.
///
/// # Errors
///
/// Returns [`AbortError::PullTimedOut`] if git does not finish in time, or a
/// plain error if git cannot be spawned or exits non-zero.
pub async fn sync_source(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    opts: &SyncOptions<'_>,
) -> Result<PullOutcome> {
    reporter.step("Pulling latest from git");

    let root = opts.root.to_string_lossy();
    let helper = credential_helper(&opts.credentials);
    let mut args: Vec<&str> = vec!["-C", root.as_ref()];
    if let Some(helper) = helper.as_deref() {
        // An empty value clears helpers inherited from user config.
        args.extend(["-c", "credential.helper=", "-c", helper]);
    }
    args.extend(["pull", "--progress"]);

    let mut envs = vec![("GIT_TERMINAL_PROMPT", "0")];
    if let Some(username) = opts.credentials.username {
        envs.push((USERNAME_VAR, username));
    }
    if let Some(password) = opts.credentials.password {
        envs.push((PASSWORD_VAR, password));
    }

    let output = match runner
        .run_with_idle_timeout("git", &args, &envs, opts.timeout)
        .await
    {
        Ok(output) => output,
        Err(e) if e.chain().any(|cause| cause.is::<TimedOut>()) => {
            return Err(AbortError::PullTimedOut {
                secs: opts.timeout.as_secs(),
            }
            .into());
        }
        Err(e) => return Err(e),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "git pull failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        );
    }

    // git writes transfer progress to stderr ahead of the merge summary on stdout.
    let text = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stderr).trim_end(),
        String::from_utf8_lossy(&output.stdout)
    );
    let outcome = pull::classify(&text);
    match &outcome {
        PullOutcome::UpToDate { message } => {
            reporter.line(message);
            reporter.success("All up to date");
        }
        PullOutcome::NewChanges { lines } => {
            for line in lines {
                reporter.line(line);
            }
            reporter.success("New version fetched");
        }
    }
    tracing::info!(new_changes = outcome.has_new_changes(), "pull finished");
    Ok(outcome)
}
