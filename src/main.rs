use anyhow::Result;
use clap::Parser;

use magicui_rs::{cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init_tracing(args.verbose)?;

    args.execute().await
}
