//! Command implementations for the climate API CLI
//!
//! Each command is implemented in its own module:
//! - `serve`: run the HTTP API over a dataset
//! - `inspect`: verify a dataset and print its summary

pub mod inspect;
pub mod serve;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler. `shutdown` is cancelled when the
/// process receives Ctrl+C; long-running commands stop gracefully on it.
pub async fn run(args: Args, shutdown: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Serve(serve_args)) => serve::run_serve(serve_args, shutdown).await,
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => Ok(()),
    }
}
