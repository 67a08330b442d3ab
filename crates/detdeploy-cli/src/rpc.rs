use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use color_eyre::eyre::{eyre, Result};
use detdeploy_core::ProviderClient;

/// Fetch the chain ID from an RPC endpoint
pub async fn get_chain_id(rpc_url: &str) -> Result<u64> {
    let url: Url = rpc_url.parse()?;
    let provider = ProviderBuilder::new().connect_http(url);
    let chain_id = provider.get_chain_id().await?;
    Ok(chain_id)
}

/// Connect a signing provider and wrap it for the dispatcher
pub fn connect_signer(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<ProviderClient<impl Provider>> {
    let url: Url = rpc_url
        .parse()
        .map_err(|e| eyre!("Invalid RPC URL '{}': {}", rpc_url, e))?;
    let from = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url);
    Ok(ProviderClient::new(provider, from))
}
