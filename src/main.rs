//! bpack CLI - buildpack packaging with a persisted pull policy
//!
//! Entry point for the bpack command-line application.

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use bpack::cli::output::{display_error, OutputConfig};
use bpack::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_config = OutputConfig::new(cli.quiet, cli.verbose);

    // Diagnostics go to stderr; stdout carries the outcome line
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    // Run the command and handle errors
    match cli.run(&output_config, cancel).await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
