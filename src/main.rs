//! Wheelhouse - prebuilt wheels for pinned dependencies
//!
//! CLI entry point that dispatches to subcommands. Expected packaging
//! failures render their diagnostic and exit 1; infrastructure faults
//! print their cause chain and exit 2.

use clap::Parser;
use console::style;
use std::error::Error;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wheelhouse::cli::{Cli, Commands};
use wheelhouse::config::{ConfigManager, Pinfile};
use wheelhouse::error::{WheelhouseError, WheelhouseResult};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_domain() => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            let mut cause = e.source();
            while let Some(inner) = cause {
                eprintln!("{} {}", style("Caused by:").yellow(), inner);
                cause = inner.source();
            }
            ExitCode::from(2)
        }
    }
}

async fn run() -> WheelhouseResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("wheelhouse=warn"),
        1 => EnvFilter::new("wheelhouse=info"),
        _ => EnvFilter::new("wheelhouse=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load global configuration
    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    // Load the project pinfile
    let pinfile = match cli.pinfile {
        Some(path) => Pinfile::from_file(path).await?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| WheelhouseError::io("getting current directory", e))?;
            debug!("Looking for pinfile in {}", cwd.display());
            Pinfile::from_directory(&cwd).await?
        }
    };

    // Dispatch to command
    match cli.command {
        Commands::BuildWheels(args) => {
            wheelhouse::cli::commands::build_wheels(args, &pinfile, &config).await
        }
        Commands::Cache(args) => wheelhouse::cli::commands::cache(args, &pinfile, &config).await,
    }
}
