use anyhow::Result;
use blockstage_core::cli::Args;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    blockstage_core::run_cli(&args).await
}
