//! FindU CLI entry point

use clap::Parser;
use findu::cli::{Cli, Commands};
use findu::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("FINDU_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => findu::cli::serve::run(args).await,
        Commands::Search(args) => findu::cli::search::run(args).await,
    }
}
