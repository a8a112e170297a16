//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the top-level flags and the loaded
//! configuration, then passed as `&AppContext` to the command handlers.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::Confirmer;
use crate::domain::config::QapushConfig;
use crate::domain::error::AbortError;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::output::OutputContext;

/// Exit code for recognised aborts (timeout, mismatch, failed build, ...).
pub const EXIT_ABORT: u8 = 1;
/// Exit code for everything else.
pub const EXIT_FAILURE: u8 = 2;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `QAPUSH_YES` env vars).
    pub yes: bool,
    /// Explicit config file path from `--config`.
    pub config: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Where the configuration came from.
    pub config_store: YamlConfigStore,
    /// Effective configuration, environment overrides applied.
    pub config: QapushConfig,
    /// Local process runner.
    pub runner: TokioCommandRunner,
    /// Local project filesystem.
    pub fs: LocalFs,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `QAPUSH_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be loaded.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("QAPUSH_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let config_store = YamlConfigStore::new(flags.behaviour.config);
        let config = config_store.load()?;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            config_store,
            config,
            runner: TokioCommandRunner::default(),
            fs: LocalFs,
            non_interactive,
        })
    }

    /// Git password from the environment variable named in the config.
    #[must_use]
    pub fn git_password(&self) -> Option<String> {
        std::env::var(&self.config.source.password_env)
            .ok()
            .filter(|v| !v.is_empty())
    }
}

impl Confirmer for AppContext {
    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `QAPUSH_YES` env),
    /// returns `default` immediately without prompting.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}

/// Map a failed run to its process exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<AbortError>()) {
        EXIT_ABORT
    } else {
        EXIT_FAILURE
    }
}
