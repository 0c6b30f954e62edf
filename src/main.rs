//! Cultivos - Application entry point
//!
//! CLI-based entry point that dispatches to the operator commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cultivos::{
    cli::{Cli, Commands},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration
    let config = match &cli.env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    };
    tracing::debug!(?config, "Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
        Commands::Users(args) => commands::users::execute(args, config).await,
        Commands::Cultivations(args) => commands::cultivations::execute(args, config).await,
    };

    // Handle errors
    if let Err(e) = result {
        if e.is_client_error() {
            tracing::warn!(code = e.code(), "Command rejected: {}", e);
        } else {
            tracing::error!(code = e.code(), "Command failed: {}", e);
        }
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
