//! Development tasks for the run simulator
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Simulate, Verify};
use tracing_subscriber::EnvFilter;

/// Development tasks for the run simulator
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the run simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a seeded run with a scripted strategy
    Simulate(Simulate),

    /// Replay a submission file and check its score
    Verify(Verify),

    /// List catalog content
    Catalog(Catalog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for VERIFY_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Verify(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}
