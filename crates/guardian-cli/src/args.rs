use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "release-guardian",
    version,
    about = "Read-only release readiness checks for local repositories"
)]
pub struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for one-shot commands
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the tools over MCP on stdin/stdout (default)
    Serve,

    /// Check repository hygiene
    Hygiene {
        repo_path: String,

        /// Use the git-aware policy (requires a working tree)
        #[arg(long)]
        git: bool,
    },

    /// Check version alignment
    Versions {
        repo_path: String,

        /// Expected release tag, e.g. v0.1.0
        #[arg(long)]
        expected: Option<String>,

        /// Read every available source instead of only pyproject.toml
        #[arg(long)]
        all_sources: bool,
    },

    /// Generate a release checklist
    Checklist { repo_path: String, version: String },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
