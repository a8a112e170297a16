//! YAML-backed configuration loading.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::QapushConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "QAPUSH_CONFIG";
/// Environment variable overriding `source.username`.
pub const USERNAME_ENV: &str = "QAPUSH_GIT_USERNAME";

/// File name looked up in the working directory.
const LOCAL_FILE: &str = "qapush.yaml";

/// Loads `QapushConfig` from a YAML file on disk.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    /// `explicit` comes from `--config` and wins over every other location.
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Resolve the config path: `--config`, `$QAPUSH_CONFIG`, `./qapush.yaml`,
    /// then `~/.qapush/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if no explicit path is given, `./qapush.yaml` is
    /// absent, and the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let local = PathBuf::from(LOCAL_FILE);
        if local.is_file() {
            return Ok(local);
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".qapush").join("config.yaml"))
    }

    /// Load the config, falling back to defaults when the file is absent,
    /// then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<QapushConfig> {
        let path = self.path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            QapushConfig::default()
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut QapushConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(username) = lookup(USERNAME_ENV).filter(|v| !v.is_empty()) {
        config.source.username = Some(username);
    }
}
