//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution, with an inactivity timeout that kills the
//! child on all platforms.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::time::Instant;

use crate::application::ports::CommandRunner;
use crate::domain::error::TimedOut;

/// Production `CommandRunner`: uses tokio for async process execution.
///
/// Only [`CommandRunner::run_with_idle_timeout`] carries a deadline, and it
/// kills the child explicitly when the deadline fires: `kill_on_drop` alone
/// is not a guarantee on every platform. `run` and `run_streaming` wait as
/// long as the child runs; remote commands are bounded by ssh's own
/// `ConnectTimeout`.
#[derive(Clone, Default)]
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        tracing::debug!(program, ?args, "spawning");
        tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to spawn {program}"))
    }

    async fn run_with_idle_timeout(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
        idle: Duration,
    ) -> Result<Output> {
        tracing::debug!(program, ?args, idle_secs = idle.as_secs(), "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .envs(envs.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout = child.stdout.take().context("stdout was not captured")?;
        let mut stderr = child.stderr.take().context("stderr was not captured")?;
        let (mut out_buf, mut err_buf) = (Vec::new(), Vec::new());
        let (mut out_chunk, mut err_chunk) = ([0u8; 8192], [0u8; 8192]);
        let (mut out_done, mut err_done) = (false, false);

        let deadline = tokio::time::sleep(idle);
        tokio::pin!(deadline);
        let timed_out = || {
            anyhow::Error::new(TimedOut {
                program: program.to_string(),
                secs: idle.as_secs(),
            })
        };

        while !(out_done && err_done) {
            tokio::select! {
                n = stdout.read(&mut out_chunk), if !out_done => {
                    let n = n.with_context(|| format!("reading {program} stdout"))?;
                    if n == 0 {
                        out_done = true;
                    } else {
                        out_buf.extend_from_slice(&out_chunk[..n]);
                        deadline.as_mut().reset(Instant::now() + idle);
                    }
                }
                n = stderr.read(&mut err_chunk), if !err_done => {
                    let n = n.with_context(|| format!("reading {program} stderr"))?;
                    if n == 0 {
                        err_done = true;
                    } else {
                        err_buf.extend_from_slice(&err_chunk[..n]);
                        deadline.as_mut().reset(Instant::now() + idle);
                    }
                }
                () = &mut deadline => {
                    let _ = child.kill().await;
                    tracing::warn!(program, idle_secs = idle.as_secs(), "killed after going silent");
                    return Err(timed_out());
                }
            }
        }

        // Both pipes are closed; a child that lingers silently still counts as idle.
        tokio::select! {
            status = child.wait() => Ok(Output {
                status: status.with_context(|| format!("waiting for {program}"))?,
                stdout: out_buf,
                stderr: err_buf,
            }),
            () = &mut deadline => {
                let _ = child.kill().await;
                tracing::warn!(program, idle_secs = idle.as_secs(), "killed after going silent");
                Err(timed_out())
            }
        }
    }

    async fn run_streaming(
        &self,
        program: &str,
        args: &[&str],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, "spawning (streaming)");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let stdout = child
            .stdout
            .take()
            .context("stdout was not captured")?;
        let stderr = child
            .stderr
            .take()
            .context("stderr was not captured")?;
        let mut out_lines = BufReader::new(stdout).lines();
        let mut err_lines = BufReader::new(stderr).lines();
        let (mut out_done, mut err_done) = (false, false);

        while !(out_done && err_done) {
            tokio::select! {
                line = out_lines.next_line(), if !out_done => {
                    match line.with_context(|| format!("reading {program} stdout"))? {
                        Some(line) => on_line(&line),
                        None => out_done = true,
                    }
                }
                line = err_lines.next_line(), if !err_done => {
                    match line.with_context(|| format!("reading {program} stderr"))? {
                        Some(line) => on_line(&line),
                        None => err_done = true,
                    }
                }
            }
        }

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
