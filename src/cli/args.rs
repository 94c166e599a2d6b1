//! Command-line argument definitions for the climate API
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the climate API server
///
/// Serves daily precipitation and temperature observations from a fixed
/// weather-station dataset as a read-only JSON API.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "climate-api",
    version,
    about = "Read-only JSON API over a weather-station precipitation and temperature dataset",
    long_about = "Serves station metadata, daily precipitation, trailing-year temperature \
                  observations and per-date temperature statistics from a read-only SQLite \
                  dataset with `measurement` and `station` tables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Verify the dataset schema and print a summary
    Inspect(InspectArgs),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON for machine consumption
    Json,
}

/// Logging flags shared by every subcommand
#[derive(Debug, Clone, Default, Parser)]
pub struct LogArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LogArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Arguments for the serve command
#[derive(Debug, Clone, Default, Parser)]
pub struct ServeArgs {
    /// Path to the SQLite dataset
    ///
    /// Overrides the configuration file and CLIMATE_API_DATABASE.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "PATH",
        help = "Path to the SQLite dataset file"
    )]
    pub database: Option<PathBuf>,

    /// Address to bind
    #[arg(long = "host", value_name = "HOST", help = "Address to bind")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    /// Maximum pooled dataset connections
    #[arg(
        long = "max-connections",
        value_name = "COUNT",
        help = "Maximum pooled dataset connections"
    )]
    pub max_connections: Option<u32>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/climate-api/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

impl ServeArgs {
    /// Validate argument values before any configuration is loaded
    pub fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(Error::configuration("--port must be non-zero"));
        }
        if self.max_connections == Some(0) {
            return Err(Error::configuration("--max-connections must be at least 1"));
        }
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Path to the SQLite dataset
    #[arg(
        short = 'd',
        long = "database",
        value_name = "PATH",
        help = "Path to the SQLite dataset file"
    )]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the summary
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub format: OutputFormat,

    #[command(flatten)]
    pub log: LogArgs,
}

impl InspectArgs {
    /// Validate argument values before any configuration is loaded
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}
