//! Runtime configuration.
//!
//! Defaults suit an agent launching the server with no arguments. A TOML
//! file may override them, and a small set of environment variables wins
//! over both.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_GIT_PROGRAM: &str = "RELEASE_GUARDIAN_GIT";
pub const ENV_GIT_TIMEOUT_SECS: &str = "RELEASE_GUARDIAN_GIT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardianConfig {
    /// Executable used for every git invocation.
    pub git_program: String,

    /// Upper bound for a single git invocation, in seconds.
    pub git_timeout_secs: u64,

    /// Tracing filter used when `RELEASE_GUARDIAN_LOG` is unset.
    pub log_filter: String,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            git_timeout_secs: 10,
            log_filter: "info".to_string(),
        }
    }
}

impl GuardianConfig {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// Resolve configuration: optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Split out from `load` so tests
    /// need not mutate the process environment.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(program) = lookup(ENV_GIT_PROGRAM) {
            self.git_program = program;
        }
        if let Some(raw) = lookup(ENV_GIT_TIMEOUT_SECS) {
            self.git_timeout_secs = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_GIT_TIMEOUT_SECS,
                reason: format!("expected a whole number of seconds, got {raw:?}"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.git_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "git_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.git_program.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "git_program",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
