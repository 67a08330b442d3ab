mod commands;
mod config;
mod effects;
mod forge;
mod keys;
mod rpc;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Command;

#[derive(Parser)]
#[command(name = "detdeploy")]
#[command(about = "Deterministic contract deployment for Foundry projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    cli.command.run().await
}
