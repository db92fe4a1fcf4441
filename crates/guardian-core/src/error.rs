//! Typed errors for the few fallible edges of the crate.
//!
//! The inspection operations themselves never return these to callers:
//! git and manifest failures are folded into report details so that no
//! fault crosses a tool boundary. Only configuration loading and tool
//! argument validation surface errors.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failure of a single git invocation.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git timed out after {}s", .elapsed.as_secs())]
    Timeout { elapsed: Duration },

    #[error("git exited with status {}: {stderr}", status_label(.code))]
    Exit { code: Option<i32>, stderr: String },

    #[error("i/o error while waiting for git: {0}")]
    Io(#[from] std::io::Error),
}

fn status_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Failure to read a version out of a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {file}: {source}")]
    Read {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Toml {
        file: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Json {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejection of a tool invocation before any inspection runs.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
