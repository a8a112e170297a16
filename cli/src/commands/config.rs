//! `qapush config`: inspect the effective configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::domain::config;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration as YAML
    Show,
    /// Print the config file path in use
    Path,
    /// Print one setting, e.g. `remote.host`
    Get {
        /// Dotted setting key
        key: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key is unknown or the config cannot be rendered.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let yaml = serde_yaml::to_string(&app.config).context("cannot serialize config")?;
            print!("{yaml}");
        }
        ConfigCommand::Path => {
            let path = app.config_store.path()?;
            println!("{}", path.display());
            if !path.exists() {
                app.output.info("File does not exist; built-in defaults are in use.");
            }
        }
        ConfigCommand::Get { key } => println!("{}", config::lookup(&app.config, &key)?),
    }
    Ok(())
}
