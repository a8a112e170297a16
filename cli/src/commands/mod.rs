//! Command implementations

pub mod build;
pub mod check;
pub mod config;
pub mod push;

use crate::app::AppContext;
use crate::application::services::source_sync::GitCredentials;

/// Credentials for the pull, borrowed from the config and `password`.
fn git_credentials<'a>(app: &'a AppContext, password: Option<&'a str>) -> GitCredentials<'a> {
    GitCredentials {
        username: app.config.source.username.as_deref(),
        password,
    }
}
