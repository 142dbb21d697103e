//! `findu search` - one-shot search from the terminal
//!
//! Runs the full pipeline against the configured store and prints the
//! response JSON, mainly for poking at ranking and date parsing without
//! standing up the server.

use crate::cli::ConfigArgs;
use crate::core::error::Result;
use crate::store::types::Campus;
use crate::web::server;
use clap::Args;

#[derive(Args)]
pub struct SearchArgs {
    /// The search message, e.g. "저번주 과학관 아이폰"
    pub message: String,

    /// Campus to search (신촌 or 송도)
    #[arg(short, long, default_value = "신촌")]
    pub campus: Campus,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn run(args: SearchArgs) -> Result<()> {
    let config = args.config.load()?;
    let service = server::build_service(&config);

    let response = service.search(&args.message, args.campus).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
