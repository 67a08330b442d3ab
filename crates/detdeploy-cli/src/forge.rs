//! Forge integration
//!
//! - Loading creation bytecode from `forge build` output
//! - Building `forge verify-contract` invocations

use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result};
use detdeploy_core::{Address, Bytecode};
use serde::Deserialize;

use crate::config::ExplorerConfig;

/// The part of a forge artifact needed for deployment
#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    pub bytecode: BytecodeObject,
}

#[derive(Debug, Deserialize)]
pub struct BytecodeObject {
    pub object: String,
}

/// Reads contract artifacts from the forge output directory
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    out_dir: PathBuf,
}

impl ArtifactLoader {
    /// Loader for `out/` in the current directory
    pub fn new() -> Self {
        Self::with_project_root(Path::new("."))
    }

    pub fn with_project_root(project_root: &Path) -> Self {
        Self {
            out_dir: project_root.join("out"),
        }
    }

    /// Load the raw contract artifact
    pub fn load(&self, contract_name: &str) -> Result<ContractArtifact> {
        let possible_paths = [
            self.out_dir
                .join(format!("{}.sol", contract_name))
                .join(format!("{}.json", contract_name)),
            self.out_dir
                .join(contract_name)
                .join(format!("{}.json", contract_name)),
        ];

        for path in &possible_paths {
            if let Ok(content) = std::fs::read_to_string(path) {
                let artifact: ContractArtifact = serde_json::from_str(&content)?;
                return Ok(artifact);
            }
        }

        Err(eyre!(
            "Could not find artifact for contract '{}'. Make sure `forge build` was run.",
            contract_name
        ))
    }

    /// Initcode for a contract: creation bytecode followed by the
    /// ABI-encoded constructor arguments, if any
    pub fn initcode(&self, contract_name: &str, constructor_args: Option<&str>) -> Result<Bytecode> {
        let artifact = self.load(contract_name)?;
        let bytecode = Bytecode::from_hex(&artifact.bytecode.object).map_err(|e| {
            eyre!(
                "Artifact '{}' cannot be deployed (interface or abstract contract?): {}",
                contract_name,
                e
            )
        })?;

        match constructor_args {
            Some(args) => Ok(bytecode.with_constructor_args(args)?),
            None => Ok(bytecode),
        }
    }
}

impl Default for ArtifactLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments for `forge verify-contract`
#[derive(Debug, Clone)]
pub struct VerifyContract {
    pub contract_name: String,
    pub chain_id: u64,
    pub constructor_args: Option<String>,
    pub explorer: Option<ExplorerConfig>,
}

impl VerifyContract {
    pub fn args(&self, address: Address) -> Vec<String> {
        let mut args = vec![
            "verify-contract".to_string(),
            address.to_checksum(None),
            self.contract_name.clone(),
            "--chain".to_string(),
            self.chain_id.to_string(),
            "--watch".to_string(),
        ];

        if let Some(constructor_args) = &self.constructor_args {
            args.push("--constructor-args".to_string());
            args.push(constructor_args.clone());
        }

        if let Some(explorer) = &self.explorer {
            if let Some(key) = &explorer.api_key {
                args.push("--etherscan-api-key".to_string());
                args.push(key.clone());
            }
            if let Some(url) = &explorer.api_url {
                args.push("--verifier-url".to_string());
                args.push(url.clone());
            }
        }

        args
    }

    /// Run forge, streaming its output. Fails on non-zero exit.
    pub async fn run(&self, address: Address) -> Result<()> {
        let status = tokio::process::Command::new("forge")
            .args(self.args(address))
            .status()
            .await
            .map_err(|e| eyre!("Failed to run forge: {}", e))?;

        if !status.success() {
            return Err(eyre!("forge verify-contract failed with {}", status));
        }

        Ok(())
    }
}
