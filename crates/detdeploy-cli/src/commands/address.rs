use clap::Args;
use color_eyre::eyre::Result;

use crate::config::DeployConfig;
use crate::forge::ArtifactLoader;

/// Print the address a contract would be deployed to, without deploying
#[derive(Args)]
pub struct AddressCommand {
    /// Contract artifact name (e.g. CeaErc20)
    pub contract: String,

    /// ABI-encoded constructor arguments as hex
    #[arg(long)]
    pub constructor_args: Option<String>,
}

impl AddressCommand {
    pub fn run(self) -> Result<()> {
        let proxy = DeployConfig::load()?.proxy()?;
        let initcode =
            ArtifactLoader::new().initcode(&self.contract, self.constructor_args.as_deref())?;

        // Just print the address for easy scripting: $(detdeploy address CeaErc20)
        println!("{}", proxy.predict_address(&initcode).to_checksum(None));
        Ok(())
    }
}
