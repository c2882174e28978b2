use anyhow::Result;
use clap::Parser;

use fee_engine::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
