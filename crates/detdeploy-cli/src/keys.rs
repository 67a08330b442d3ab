//! Deployer key resolution

use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{eyre, Result};
use dialoguer::Password;

/// Environment variable consulted when no key is passed on the command line
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

/// Resolve the deployer: explicit flag, then environment, then a hidden prompt
pub fn resolve_signer(flag: Option<&str>) -> Result<PrivateKeySigner> {
    let private_key = match flag {
        Some(key) => key.to_string(),
        None => match std::env::var(PRIVATE_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => Password::new()
                .with_prompt("Enter deployer private key (with or without 0x prefix)")
                .interact()?,
        },
    };

    parse_signer(&private_key)
}

/// Parse a private key, accepting it with or without the 0x prefix
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    let private_key = private_key.trim();
    let private_key = if private_key.starts_with("0x") {
        private_key.to_string()
    } else {
        format!("0x{}", private_key)
    };

    private_key
        .parse()
        .map_err(|e| eyre!("Invalid private key: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    // First default anvil account
    const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_signer_without_prefix() {
        let signer = parse_signer(ANVIL_KEY).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_parse_signer_with_prefix() {
        let signer = parse_signer(&format!("0x{}\n", ANVIL_KEY)).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_parse_signer_invalid() {
        assert!(parse_signer("0x1234").is_err());
        assert!(parse_signer("not a key").is_err());
    }

    #[test]
    fn test_resolve_signer_prefers_flag() {
        let signer = resolve_signer(Some(ANVIL_KEY)).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }
}
