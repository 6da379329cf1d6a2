//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Wheelhouse - prebuilt wheels for pinned dependencies
///
/// Reads the project pinfile and guarantees a cached wheel exists for
/// every pinned package before deployment.
#[derive(Parser, Debug)]
#[command(name = "wheelhouse")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Pinfile path (defaults to ./wheelhouse.toml)
    #[arg(short, long, global = true, env = "WHEELHOUSE_PINFILE")]
    pub pinfile: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true, env = "WHEELHOUSE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build wheels of pinned packages
    BuildWheels(BuildWheelsArgs),

    /// Inspect the wheel cache
    Cache(CacheArgs),
}

/// Arguments for the build-wheels command
#[derive(Parser, Debug)]
pub struct BuildWheelsArgs {
    /// Show no output
    #[arg(short, long)]
    pub silent: bool,

    /// Check that the wheels exist instead of building
    #[arg(short, long)]
    pub check: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached wheels
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show cache status for the pinned packages
    Info,
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
