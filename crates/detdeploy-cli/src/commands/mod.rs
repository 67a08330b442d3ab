//! CLI commands for detdeploy

use clap::Subcommand;
use color_eyre::eyre::Result;

pub mod address;
pub mod deploy;

/// All available CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a contract through the deterministic deployment proxy
    Deploy(deploy::DeployCommand),

    /// Print the address a contract would be deployed to, without deploying
    Address(address::AddressCommand),
}

impl Command {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Command::Deploy(cmd) => cmd.run().await,
            Command::Address(cmd) => cmd.run(),
        }
    }
}
