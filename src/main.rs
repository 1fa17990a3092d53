use clap::Parser;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

mod cache;
mod cli;
mod config;
mod error;
mod report;
mod tracker;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show debug logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("pulse=debug")
    } else {
        EnvFilter::new("pulse=warn")
    };

    // Reports go to stdout, so logs stay on stderr or in the log file
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match &cli.command {
        Commands::Planning => cli::planning::execute(&cli).await,
        Commands::Retro(args) => cli::retro::execute(&cli, args).await,
        Commands::Schema => cli::schema::execute(),
    }
}
