//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Pull, build and push the web application to the QA server
#[derive(Parser)]
#[command(
    name = "qapush",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Config file (default: $QAPUSH_CONFIG, ./qapush.yaml, ~/.qapush/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (the service log tail is still shown)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// More diagnostic logging on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Skip the confirmation prompt before deploying
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pull latest source and build it if anything changed
    Build(commands::build::BuildArgs),

    /// Pull, build, check the run mode, and deploy to the QA server
    Push,

    /// Check the application's run mode without deploying
    Check,

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            config,
            quiet,
            no_color,
            yes,
            command,
            ..
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags { no_color, quiet },
            behaviour: BehaviourFlags { yes, config },
        })?;

        match command {
            Command::Build(args) => commands::build::run(&app, &args).await,
            Command::Push => commands::push::run(&app).await,
            Command::Check => commands::check::run(&app),
            Command::Config(cmd) => commands::config::run(&app, cmd),
        }
    }
}
