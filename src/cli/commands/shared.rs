//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and dataset opening used by
//! every subcommand.

use crate::app::services::observation_store::SchemaReport;
use crate::cli::args::{InspectArgs, LogArgs, ServeArgs};
use crate::config::Config;
use crate::{Result, SqliteStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Set up structured logging for a command
pub fn setup_logging(args: &LogArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // RUST_LOG takes precedence over the -v/-q flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("climate_api={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    // A subscriber may already be installed when commands run in-process
    match result {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Keeping existing subscriber: {}", e),
    }
    Ok(())
}

/// Pick the explicit config file, or the default location if it exists
pub fn resolve_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load configuration using layered approach (file -> env)
pub fn load_base_configuration(explicit: Option<&Path>) -> Result<Config> {
    let config_file = resolve_config_file(explicit);

    if let Some(config_path) = &config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    Config::load_layered(config_file.as_deref())
}

/// Load configuration for the serve command (file -> env -> args)
pub fn load_serve_configuration(args: &ServeArgs) -> Result<Config> {
    let mut config = load_base_configuration(args.config_file.as_deref())?;
    apply_serve_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Load configuration for the inspect command (file -> env -> args)
pub fn load_inspect_configuration(args: &InspectArgs) -> Result<Config> {
    let mut config = load_base_configuration(args.config_file.as_deref())?;
    if let Some(database) = &args.database {
        config.database.path = database.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Apply serve argument overrides to configuration
pub fn apply_serve_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(database) = &args.database {
        config.database.path = database.clone();
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(max_connections) = args.max_connections {
        config.database.max_connections = max_connections;
    }
}

/// Open the dataset and verify its declared schema
pub async fn open_verified_store(config: &Config) -> Result<(SqliteStore, SchemaReport)> {
    let store = SqliteStore::connect(&config.database).await?;
    let report = store.verify_schema().await?;
    debug!(
        "Dataset columns: measurement {:?}, station {:?}",
        report.measurement_columns, report.station_columns
    );
    Ok((store, report))
}
