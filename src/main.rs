mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use linker_core::RunConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("failed to load .env: {err}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::process::exit(run().await);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    let config = match RunConfig::from_env().and_then(|c| {
        c.validate()?;
        Ok(c)
    }) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return 1;
        }
    };

    let result = match &cli.command {
        Command::Import(args) => commands::run_import(args).await,
        Command::Linker { command } => commands::run_linker(command, &config, &cli.qids).await,
        Command::Sync { command } => commands::run_sync(command, &config, &cli.qids).await,
        Command::Ingest { command } => commands::run_ingest(command).await,
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, "command failed");
            1
        }
    }
}
