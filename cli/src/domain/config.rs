//! Domain types and validators for qapush configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.
//! Secrets never live here: the config names the environment variables that
//! carry them.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `qapush.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QapushConfig {
    /// Local project layout.
    pub project: ProjectConfig,
    /// Version-control pull settings.
    pub source: SourceConfig,
    /// Build tool invocation.
    pub build: BuildConfig,
    /// Run-mode assertion on the application properties file.
    pub run_mode: RunModeConfig,
    /// QA host and service layout.
    pub remote: RemoteConfig,
    /// Post-restart readiness check.
    pub readiness: ReadinessConfig,
}

/// Local project layout. Relative paths resolve against `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub descriptor: String,
    pub artifact: String,
    pub properties_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            descriptor: "pom.xml".to_string(),
            artifact: "target/api-0.9.0-SNAPSHOT.war".to_string(),
            properties_file: "src/main/webapp/WEB-INF/conf/blahguaConfiguration.properties"
                .to_string(),
        }
    }
}

impl ProjectConfig {
    #[must_use]
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(&self.descriptor)
    }

    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(&self.artifact)
    }

    #[must_use]
    pub fn properties_path(&self) -> PathBuf {
        self.root.join(&self.properties_file)
    }
}

/// Version-control pull settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Login name for the remote. Overridden by `QAPUSH_GIT_USERNAME`.
    pub username: Option<String>,
    /// Name of the environment variable holding the password.
    pub password_env: String,
    /// Seconds the pull may go without output before it is killed.
    pub pull_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            username: None,
            password_env: "QAPUSH_GIT_PASSWORD".to_string(),
            pull_timeout_secs: 30,
        }
    }
}

/// Build tool invocation: `<program> -f <descriptor> <goals...>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub program: String,
    pub goals: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "mvn".to_string(),
            goals: vec!["clean".to_string(), "package".to_string()],
        }
    }
}

/// Run-mode assertion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunModeConfig {
    /// Properties key declaring the run mode.
    pub key: String,
    /// Expected value, compared case-insensitively.
    pub expected: String,
    /// Treat a missing key as an abort instead of a warning.
    pub require_key: bool,
}

impl Default for RunModeConfig {
    fn default() -> Self {
        Self {
            key: "blahgua.run.mode".to_string(),
            expected: "qa".to_string(),
            require_key: false,
        }
    }
}

/// QA host and application-server layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    /// Name of the environment variable holding the key-pair path.
    pub key_env: String,
    /// File name of the artifact in the remote home directory and in `deploy_dir`.
    pub staged_artifact: String,
    pub service: String,
    pub deploy_dir: String,
    pub owner: String,
    pub log_file: String,
    pub log_lines: u32,
    pub quiesce_secs: u64,
    /// Compare local and remote SHA-256 after the copy, before the service
    /// is stopped. Off by default.
    pub verify_digest: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: None,
            key_env: "OREGON".to_string(),
            staged_artifact: "ROOT.war".to_string(),
            service: "tomcat7".to_string(),
            deploy_dir: "/usr/share/tomcat7/webapps".to_string(),
            owner: "tomcat:tomcat".to_string(),
            log_file: "/var/log/tomcat7/catalina.out".to_string(),
            log_lines: 200,
            quiesce_secs: 5,
            verify_digest: false,
        }
    }
}

/// Post-restart readiness check, run on the remote host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Succeeds once the connector answers at all. Any HTTP status counts,
    /// so a REST API without a root resource is still ready.
    pub command: String,
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            command: "curl -s -o /dev/null http://localhost:8080/".to_string(),
            interval_secs: 10,
            timeout_secs: 90,
        }
    }
}

// ── Resolved remote target ───────────────────────────────────────────────────

/// Host, user and key-pair path needed by scp and ssh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub user: String,
    pub key_path: PathBuf,
}

impl RemoteTarget {
    /// `user@host`, as accepted by ssh and scp.
    #[must_use]
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

impl RemoteConfig {
    /// Resolve the remote target, given the value of `key_env` (if set).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the host, user, or key-pair path is missing.
    pub fn target(&self, key_path: Option<&Path>) -> Result<RemoteTarget, ConfigError> {
        let host = non_empty(self.host.as_deref()).ok_or_else(|| missing("remote.host"))?;
        let user = non_empty(self.user.as_deref()).ok_or_else(|| missing("remote.user"))?;
        let key_path = key_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv {
                var: self.key_env.clone(),
                purpose: "path to the SSH key-pair for the QA host".to_string(),
            })?;
        Ok(RemoteTarget {
            host: host.to_string(),
            user: user.to_string(),
            key_path: key_path.to_path_buf(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingValue {
        key: key.to_string(),
        hint: "see `qapush config path`".to_string(),
    }
}

// ── Dotted-key lookup ────────────────────────────────────────────────────────

/// All leaf keys of the config, in dotted form (`remote.host`, ...).
#[must_use]
pub fn config_keys(config: &QapushConfig) -> Vec<String> {
    let mut keys = Vec::new();
    if let Ok(value) = serde_yaml::to_value(config) {
        collect_keys(&value, "", &mut keys);
    }
    keys
}

fn collect_keys(value: &serde_yaml::Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let Some(name) = k.as_str() else { continue };
                let key = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{prefix}.{name}")
                };
                collect_keys(v, &key, out);
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

/// Look up a single setting by dotted key and render it as YAML.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] if the key does not name a setting.
pub fn lookup(config: &QapushConfig, key: &str) -> Result<String> {
    let root = serde_yaml::to_value(config)?;
    let found = key
        .split('.')
        .try_fold(&root, |node, part| node.get(part))
        .filter(|node| !node.is_mapping());
    match found {
        Some(serde_yaml::Value::String(s)) => Ok(s.clone()),
        Some(serde_yaml::Value::Null) => Ok(String::new()),
        Some(other) => Ok(serde_yaml::to_string(other)?.trim_end().to_string()),
        None => Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: config_keys(config).join(", "),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
