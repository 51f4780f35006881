//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Drawing the weather card in the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    // Logs go to stderr so they never interleave with the card.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cmd.verbose))
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}

/// `RUST_LOG` wins unless `-v` was given explicitly.
fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        _ => EnvFilter::new(log_filter_from_verbosity(verbose)),
    }
}

fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,weather_card_core=debug",
        2 => "debug",
        _ => "trace",
    }
}
