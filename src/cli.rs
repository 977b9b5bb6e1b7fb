//! CLI definitions for revisor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// revisor CLI.
#[derive(Parser)]
#[command(name = "revisor")]
#[command(about = "Deliberation review service backed by Azure OpenAI")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path; must exist when given
    /// (default: config/revisor.toml, skipped when absent)
    #[arg(short, long, env = "REVISOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file to load before reading the environment (default: ./.env)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host, overrides configuration
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, then exit
    Check,
}
