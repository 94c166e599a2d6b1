use clap::Parser;
use climate_api::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<()> = runtime.block_on(async {
        // Cancelled on Ctrl+C; the server drains in-flight requests before returning
        let cancellation_token = CancellationToken::new();

        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await?;
        Ok(())
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Climate API - Weather Station Observation Service");
    println!("=================================================");
    println!();
    println!("Serve daily precipitation and temperature observations from a");
    println!("read-only weather-station dataset as a JSON API.");
    println!();
    println!("USAGE:");
    println!("    climate-api <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Run the HTTP API server");
    println!("    inspect     Verify the dataset schema and print a summary");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve the default dataset on 127.0.0.1:5000:");
    println!("    climate-api serve");
    println!();
    println!("    # Serve a specific dataset on all interfaces:");
    println!("    climate-api serve --database /data/hawaii.sqlite --host 0.0.0.0 --port 8080");
    println!();
    println!("    # Summarize a dataset as JSON:");
    println!("    climate-api inspect --database /data/hawaii.sqlite --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    climate-api <COMMAND> --help");
}
