//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts local process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output. No deadline.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with extra environment variables, killing it once it
    /// has produced no output for `idle`.
    ///
    /// Every chunk on stdout or stderr restarts the idle clock, so a slow
    /// process that keeps reporting progress is never cut off. `envs` are set
    /// on the child only; implementations must not log their values.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned. On timeout the child
    /// is killed and the error chain contains [`crate::domain::TimedOut`].
    async fn run_with_idle_timeout(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
        idle: Duration,
    ) -> Result<Output>;

    /// Run a program, handing each stdout/stderr line to `on_line` as it
    /// arrives, and return its exit status.
    async fn run_streaming(
        &self,
        program: &str,
        args: &[&str],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExitStatus>;
}

// ── Remote Host Ports ─────────────────────────────────────────────────────────

/// Structured result of one remote operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutput {
    /// Exit code; `-1` when the process was terminated by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RemoteOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Convert captured process output, decoding lossily.
    #[must_use]
    pub fn from_output(output: &Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// One command per call against an already-authenticated host.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Execute a shell command on the remote host and wait for it to finish.
    async fn exec(&self, command: &str) -> Result<RemoteOutput>;
}

/// The QA host: file upload plus session establishment.
#[allow(async_fn_in_trait)]
pub trait RemoteHost {
    type Session: RemoteShell;

    /// Host name, for reports.
    fn host(&self) -> &str;

    /// Copy a local file to `remote` (relative to the remote home directory).
    async fn upload(&self, local: &Path, remote: &str) -> Result<RemoteOutput>;

    /// Open an authenticated session. Fails if the host is unreachable.
    async fn open_session(&self) -> Result<Self::Session>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Read access to files in the local project.
pub trait ProjectFiles {
    fn exists(&self, path: &Path) -> bool;
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hash of a file, as lowercase hex.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Echo one line of external command output verbatim.
    fn line(&self, line: &str);
    /// Echo a line the operator must see even with `--quiet`.
    fn show(&self, line: &str);
    /// Update the remaining time while waiting on the remote service.
    fn countdown(&self, remaining_secs: u64);
}

/// Asks the operator before destructive remote actions.
pub trait Confirmer {
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}
