use std::collections::HashMap;
use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use detdeploy_core::{Address, DeterministicProxy};
use serde::Deserialize;

const FOUNDRY_CONFIG: &str = "foundry.toml";
const DEPLOY_CONFIG: &str = "detdeploy.toml";

/// Foundry configuration file structure (foundry.toml)
/// We only parse the sections we need
#[derive(Debug, Clone, Deserialize)]
pub struct FoundryConfig {
    #[serde(default)]
    pub rpc_endpoints: HashMap<String, RpcEndpoint>,
    #[serde(default)]
    pub etherscan: HashMap<String, EtherscanConfig>,
}

/// RPC endpoint can be a string or an object with url field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RpcEndpoint {
    Url(String),
    Object { url: String },
}

impl RpcEndpoint {
    pub fn url(&self) -> &str {
        match self {
            RpcEndpoint::Url(url) => url,
            RpcEndpoint::Object { url } => url,
        }
    }
}

/// Etherscan config for a network
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FoundryConfig {
    /// Load configuration from foundry.toml in the current directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(FOUNDRY_CONFIG))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| eyre!("Could not find foundry.toml. Is this a Foundry project?"))?;

        let config: FoundryConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get a network configuration by name, resolving environment variables
    /// Note: chain_id must be fetched from RPC separately
    pub fn get_network(&self, name: &str) -> Result<NetworkConfig> {
        let rpc_endpoint = self.rpc_endpoints.get(name).ok_or_else(|| {
            eyre!(
                "Network '{}' not found in foundry.toml [rpc_endpoints]",
                name
            )
        })?;

        let rpc_url = resolve_env_var(rpc_endpoint.url())?;

        let etherscan = self
            .etherscan
            .get(name)
            .map(|e| -> Result<ExplorerConfig> {
                Ok(ExplorerConfig {
                    api_key: e.key.as_deref().map(resolve_env_var).transpose()?,
                    api_url: e.url.as_deref().map(resolve_env_var).transpose()?,
                })
            })
            .transpose()?;

        Ok(NetworkConfig {
            name: name.to_string(),
            rpc_url,
            etherscan,
        })
    }
}

/// Network configuration extracted from foundry.toml
/// chain_id is not included here - it should be fetched from RPC
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub etherscan: Option<ExplorerConfig>,
}

/// Resolved block explorer settings used for source verification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

/// Project settings (detdeploy.toml). The file is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Deterministic deployment proxy, defaults to the well-known address.
    /// Must deploy with CREATE2 and a zero salt over the whole calldata;
    /// proxies that read a salt from the calldata are not supported.
    #[serde(default)]
    pub proxy_address: Option<String>,
    /// Confirmation wait limit in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl DeployConfig {
    /// Load detdeploy.toml from the current directory, if present
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEPLOY_CONFIG))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let config: DeployConfig = toml::from_str(&content)
            .wrap_err_with(|| format!("Invalid {}", path.display()))?;
        Ok(config)
    }

    /// The configured proxy
    pub fn proxy(&self) -> Result<DeterministicProxy> {
        match &self.proxy_address {
            Some(raw) => {
                let address: Address = resolve_env_var(raw)?
                    .parse()
                    .map_err(|e| eyre!("Invalid proxy_address '{}': {}", raw, e))?;
                Ok(DeterministicProxy::new(address))
            }
            None => Ok(DeterministicProxy::default()),
        }
    }
}

/// Resolve environment variable references in a string
/// Supports ${VAR_NAME} syntax
fn resolve_env_var(value: &str) -> Result<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).map_err(|_| eyre!("Environment variable '{}' not set", var_name))
    } else {
        Ok(value.to_string())
    }
}
