//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deploy;
pub mod error;
pub mod pull;
pub mod run_mode;

pub use config::{QapushConfig, RemoteTarget};
pub use error::{AbortError, ConfigError, DeployError, TimedOut};
pub use pull::PullOutcome;
pub use run_mode::RunModeStatus;
