//! Deploy a contract through the deterministic deployment proxy

use std::time::Duration;

use clap::{ArgAction, Args};
use color_eyre::eyre::Result;
use console::style;
use detdeploy_core::{DeploymentRequest, DeterministicProxy, Dispatcher};

use crate::config::{DeployConfig, FoundryConfig};
use crate::effects::{output_key, AddressTable, EtherscanVerification, GithubOutput};
use crate::forge::{ArtifactLoader, VerifyContract};
use crate::keys::resolve_signer;
use crate::rpc::{connect_signer, get_chain_id};

#[derive(Args)]
pub struct DeployCommand {
    /// Contract artifact name (e.g. CeaErc20)
    pub contract: String,

    /// Network name from foundry.toml [rpc_endpoints]
    #[arg(long, short)]
    pub network: String,

    /// How many block confirmations to wait for
    #[arg(long, default_value_t = DeploymentRequest::DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Print the address in the console
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub print_address: bool,

    /// Set the contract address as an output in GitHub Actions
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub set_output: bool,

    /// Whether the contract should be verified on Etherscan
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub verify_etherscan: bool,

    /// Give up waiting for confirmations after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// GitHub Actions output name (defaults to the kebab-cased contract name)
    #[arg(long)]
    pub output_name: Option<String>,

    /// ABI-encoded constructor arguments as hex
    #[arg(long)]
    pub constructor_args: Option<String>,

    /// Deployer private key (falls back to DEPLOYER_PRIVATE_KEY, then a prompt)
    #[arg(long)]
    pub private_key: Option<String>,
}

impl DeployCommand {
    pub async fn run(self) -> Result<()> {
        let foundry = FoundryConfig::load()?;
        let network = foundry.get_network(&self.network)?;
        let settings = DeployConfig::load()?;
        let proxy = settings.proxy()?;

        let initcode =
            ArtifactLoader::new().initcode(&self.contract, self.constructor_args.as_deref())?;
        let request = self.request(proxy, settings.timeout);

        println!(
            "{} Connecting to {}...",
            style("→").blue(),
            style(&network.name).cyan()
        );
        let chain_id = get_chain_id(&network.rpc_url).await?;

        let signer = resolve_signer(self.private_key.as_deref())?;
        println!(
            "{} Deploying {} from {} via proxy {} (chain ID: {})",
            style("→").blue(),
            style(&self.contract).cyan(),
            style(signer.address()).yellow(),
            style(proxy.address()).yellow(),
            chain_id
        );

        let key = self
            .output_name
            .clone()
            .unwrap_or_else(|| output_key(&self.contract));
        let verify = VerifyContract {
            contract_name: self.contract.clone(),
            chain_id,
            constructor_args: self.constructor_args.clone(),
            explorer: network.etherscan.clone(),
        };

        let dispatcher = Dispatcher::new(connect_signer(&network.rpc_url, signer)?)
            .with_effect(GithubOutput::from_env(key))
            .with_effect(AddressTable::new())
            .with_effect(EtherscanVerification::new(verify));

        let deployment = dispatcher.deploy(&request, &initcode).await?;

        println!();
        match deployment.block_number {
            Some(block) => println!(
                "{} {} deployed at {} (tx {}, block {})",
                style("✓").green().bold(),
                style(&deployment.contract_name).cyan(),
                style(deployment.address_string()).yellow(),
                deployment.tx_hash,
                block
            ),
            None => println!(
                "{} {} submitted for {} (tx {}, not awaited)",
                style("⚠").yellow(),
                style(&deployment.contract_name).cyan(),
                style(deployment.address_string()).yellow(),
                deployment.tx_hash
            ),
        }

        Ok(())
    }

    fn request(&self, proxy: DeterministicProxy, default_timeout: Option<u64>) -> DeploymentRequest {
        DeploymentRequest::new(proxy, self.contract.clone())
            .with_confirmations(self.confirmations)
            .with_timeout(self.timeout.or(default_timeout).map(Duration::from_secs))
            .with_print_address(self.print_address)
            .with_set_output(self.set_output)
            .with_verify_etherscan(self.verify_etherscan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use detdeploy_core::EffectKind;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        deploy: DeployCommand,
    }

    fn parse(args: &[&str]) -> DeployCommand {
        let mut argv = vec!["detdeploy", "CeaErc20", "--network", "sepolia"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().deploy
    }

    #[test]
    fn test_defaults() {
        let cmd = parse(&[]);

        assert_eq!(cmd.contract, "CeaErc20");
        assert_eq!(cmd.network, "sepolia");
        assert_eq!(cmd.confirmations, 2);
        assert!(cmd.print_address);
        assert!(!cmd.set_output);
        assert!(!cmd.verify_etherscan);
    }

    #[test]
    fn test_default_request_only_prints() {
        let request = parse(&[]).request(DeterministicProxy::default(), None);

        assert_eq!(request.confirmations(), 2);
        assert!(request.timeout().is_none());
        assert_eq!(request.enabled_effects(), vec![EffectKind::PrintAddress]);
    }

    #[test]
    fn test_boolean_flags_take_values() {
        let cmd = parse(&[
            "--print-address",
            "false",
            "--set-output",
            "true",
            "--verify-etherscan",
            "true",
            "--confirmations",
            "0",
        ]);
        let request = cmd.request(DeterministicProxy::default(), None);

        assert_eq!(request.confirmations(), 0);
        assert_eq!(
            request.enabled_effects(),
            vec![EffectKind::SetOutput, EffectKind::VerifyEtherscan]
        );
    }

    #[test]
    fn test_timeout_flag_overrides_config() {
        let request = parse(&["--timeout", "30"]).request(DeterministicProxy::default(), Some(600));
        assert_eq!(request.timeout(), Some(Duration::from_secs(30)));

        let request = parse(&[]).request(DeterministicProxy::default(), Some(600));
        assert_eq!(request.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_proxy_comes_from_configuration() {
        let proxy = DeterministicProxy::default();
        let request = parse(&[]).request(proxy, None);
        assert_eq!(request.proxy(), &proxy);
    }

    #[test]
    fn test_rejects_negative_confirmations() {
        let argv = ["detdeploy", "CeaErc20", "--network", "x", "--confirmations", "-1"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }
}
