//! revisor - deliberation review service
//!
//! Main entry point for the revisor CLI and server.

mod cli;
mod server;

use clap::Parser;

use revisor_config::{Config, ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Variables already set in the process win over the dotenv file.
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let mut config = ConfigLoader::load_with_env(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Check) => check_config(&config),
        command => {
            if let Some(Commands::Run { host, port }) = command {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
            }
            server::init_tracing(&config.logging)?;
            server::report_validation(&ConfigValidator::validate(&config))?;
            server::run_server(config).await
        }
    }
}

/// Print the validation result; non-zero exit on errors.
fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);

    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    for error in &result.errors {
        println!("error: {}", error);
    }

    if result.is_valid() {
        println!("Configuration OK");
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}
