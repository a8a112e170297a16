//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Recognised aborts ─────────────────────────────────────────────────────────

/// Conditions the pipeline recognises and reports with remediation.
///
/// `main` maps any error chain containing an `AbortError` to exit code 1.
/// Everything else exits with 2.
#[derive(Debug, Error)]
pub enum AbortError {
    #[error("git pull made no progress for {secs}s.\nTry again or build manually.")]
    PullTimedOut { secs: u64 },

    #[error("Build failed (exit {code}). Fix the build and try again.")]
    BuildFailed { code: i32 },

    #[error(
        "Config file not set for {expected} release!\nChange line '{key}={value}' to '{key}={expected}'\nThen try again."
    )]
    RunModeMismatch {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Config file has no '{key}' line.\nAdd '{key}={expected}' and try again.")]
    RunModeMissing { key: String, expected: String },

    #[error(
        "Service did not become ready within {waited_secs}s.\nInspect the log above and restart it manually if needed."
    )]
    ServiceNotReady { waited_secs: u64 },

    #[error("Deployment cancelled.")]
    Declined,
}

// ── Process errors ────────────────────────────────────────────────────────────

/// A local process exceeded its timeout and was killed.
#[derive(Debug, Error)]
#[error("{program} produced no output for {secs}s")]
pub struct TimedOut {
    pub program: String,
    pub secs: u64,
}

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Failures during the remote deployment sequence.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Artifact not found at {0}. Did the build produce it?")]
    ArtifactMissing(String),

    #[error("Secure copy to {host} failed (exit {code}): {stderr}")]
    CopyFailed {
        host: String,
        code: i32,
        stderr: String,
    },

    #[error("Copied artifact digest mismatch: local {local}, remote {remote}")]
    DigestMismatch { local: String, remote: String },

    #[error("Cannot open remote session to {host} (exit {code}): {stderr}")]
    SessionFailed {
        host: String,
        code: i32,
        stderr: String,
    },

    #[error("Remote step '{step}' failed (exit {code}): {stderr}")]
    RemoteCommandFailed {
        step: String,
        code: i32,
        stderr: String,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to tool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing setting: {key}\n\nSet it in the config file ({hint}).")]
    MissingValue { key: String, hint: String },

    #[error("Environment variable {var} is not set ({purpose}).")]
    MissingEnv { var: String, purpose: String },

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },
}
