//! Pantry CLI - recipe-driven packager for native toolchains and libraries
//!
//! Entry point for the pantry command-line application.

use anyhow::Result;
use clap::Parser;

use pantry::cli::output::display_error;
use pantry::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level().into()),
        )
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
