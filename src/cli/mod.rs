//! CLI argument definitions and command dispatch

pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "findu", version, about = "Campus lost-and-found search service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP search service
    Serve(serve::ServeArgs),
    /// Run a single search from the terminal and print the JSON response
    Search(search::SearchArgs),
}

/// Shared options for loading configuration
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Path to a config.toml (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> crate::core::error::Result<crate::core::config::Config> {
        match &self.config {
            Some(path) => crate::core::config::Config::load_from(path),
            None => crate::core::config::Config::load(),
        }
    }
}
