use async_trait::async_trait;
use console::style;
use detdeploy_core::{DeploymentEffect, DeploymentResult, EffectKind, Error, Result};

use crate::forge::VerifyContract;

/// Submits the deployed contract for source verification on the network's
/// block explorer
#[derive(Debug, Clone)]
pub struct EtherscanVerification {
    verify: VerifyContract,
}

impl EtherscanVerification {
    pub fn new(verify: VerifyContract) -> Self {
        Self { verify }
    }
}

#[async_trait]
impl DeploymentEffect for EtherscanVerification {
    fn kind(&self) -> EffectKind {
        EffectKind::VerifyEtherscan
    }

    async fn apply(&self, deployment: &DeploymentResult) -> Result<()> {
        println!();
        println!(
            "{} Verifying {} at {}...",
            style("→").blue(),
            style(&deployment.contract_name).cyan(),
            style(deployment.address_string()).yellow()
        );

        self.verify
            .run(deployment.address)
            .await
            .map_err(|e| Error::effect(self.kind(), e))
    }
}
