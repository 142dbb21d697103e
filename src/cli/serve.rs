//! `findu serve` - run the HTTP search service

use crate::cli::ConfigArgs;
use crate::core::error::Result;
use crate::web::server;
use clap::Args;

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = args.config.load()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    server::serve(&config).await
}
