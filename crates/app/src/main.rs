//! Courier - Main Entry Point
//!
//! Wires the file-backed adapters and the reqwest client into the use cases
//! and runs one command.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use courier_infrastructure::default_data_dir;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::Services;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(default_data_dir)
        .ok_or("could not determine a data directory; pass --data-dir")?;

    let services = Services::open(&data_dir, cli.insecure).await?;
    let succeeded = services.dispatch(cli.command).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
