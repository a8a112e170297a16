//! Remote command plan for replacing the deployed artifact.
//!
//! Each step renders to one shell command executed on the QA host. The deploy
//! service runs them in declaration order: digest, stop, clean, move, chown,
//! start, then the log tail once the service is up.

use std::path::Path;

use crate::domain::config::RemoteConfig;

/// One remote shell command with a short name used in reports and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStep {
    pub name: &'static str,
    pub command: String,
}

/// Commands derived from the remote service layout.
pub struct DeployPlan<'a> {
    cfg: &'a RemoteConfig,
}

impl<'a> DeployPlan<'a> {
    #[must_use]
    pub fn new(cfg: &'a RemoteConfig) -> Self {
        Self { cfg }
    }

    /// Destination of the secure copy, relative to the remote home directory.
    #[must_use]
    pub fn staged_path(&self) -> &str {
        &self.cfg.staged_artifact
    }

    #[must_use]
    pub fn deployed_path(&self) -> String {
        format!(
            "{}/{}",
            self.cfg.deploy_dir.trim_end_matches('/'),
            self.cfg.staged_artifact
        )
    }

    #[must_use]
    pub fn digest(&self) -> RemoteStep {
        RemoteStep {
            name: "digest",
            command: format!("sha256sum {}", quote(self.staged_path())),
        }
    }

    #[must_use]
    pub fn stop(&self) -> RemoteStep {
        RemoteStep {
            name: "stop",
            command: format!("sudo service {} stop", quote(&self.cfg.service)),
        }
    }

    /// Removes the deployed artifact and the directory the server exploded it into.
    #[must_use]
    pub fn clean(&self) -> RemoteStep {
        let stem = Path::new(&self.cfg.staged_artifact)
            .file_stem()
            .map_or_else(|| self.cfg.staged_artifact.clone(), |s| s.to_string_lossy().into_owned());
        let prefix = format!("{}/{stem}", self.cfg.deploy_dir.trim_end_matches('/'));
        RemoteStep {
            name: "clean",
            command: format!("sudo rm -rf {}*", quote(&prefix)),
        }
    }

    #[must_use]
    pub fn install(&self) -> RemoteStep {
        RemoteStep {
            name: "move",
            command: format!(
                "sudo mv {} {}",
                quote(self.staged_path()),
                quote(&self.deployed_path())
            ),
        }
    }

    #[must_use]
    pub fn chown(&self) -> RemoteStep {
        RemoteStep {
            name: "chown",
            command: format!(
                "sudo chown {} {}",
                quote(&self.cfg.owner),
                quote(&self.deployed_path())
            ),
        }
    }

    #[must_use]
    pub fn start(&self) -> RemoteStep {
        RemoteStep {
            name: "start",
            command: format!("sudo service {} start", quote(&self.cfg.service)),
        }
    }

    #[must_use]
    pub fn tail_log(&self) -> RemoteStep {
        RemoteStep {
            name: "tail",
            command: format!(
                "sudo tail -n{} {}",
                self.cfg.log_lines,
                quote(&self.cfg.log_file)
            ),
        }
    }
}

/// Extract the hex digest from `sha256sum` output.
#[must_use]
pub fn parse_sha256sum(stdout: &str) -> Option<String> {
    stdout
        .split_whitespace()
        .next()
        .filter(|d| d.len() == 64 && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .map(str::to_ascii_lowercase)
}

/// Single-quote `s` for a POSIX shell unless it is made only of safe characters.
#[must_use]
pub fn quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"_-./:@%+=,".contains(&b));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
