//! Initcode handling
//!
//! The deterministic proxy receives the raw initcode (creation bytecode
//! followed by ABI-encoded constructor arguments) as calldata, so the exact
//! bytes here decide the deployed address.

use alloy::primitives::{keccak256, Bytes, B256};

use crate::error::{Error, Result};

/// Contract creation bytecode, optionally extended with constructor arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytecode {
    bytes: Vec<u8>,
}

impl Bytecode {
    /// Parse creation bytecode from a hex string (with or without 0x prefix).
    ///
    /// Empty bytecode belongs to interfaces and abstract contracts, which
    /// cannot be deployed.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let clean = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if clean.is_empty() {
            return Err(Error::InvalidBytecode("bytecode is empty".into()));
        }
        let bytes = hex::decode(clean)?;
        Ok(Self { bytes })
    }

    /// Create bytecode from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidBytecode("bytecode is empty".into()));
        }
        Ok(Self { bytes })
    }

    /// Append ABI-encoded constructor arguments given as hex.
    pub fn with_constructor_args(mut self, args_hex: &str) -> Result<Self> {
        let trimmed = args_hex.trim();
        let clean = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if !clean.is_empty() {
            self.bytes.extend(hex::decode(clean)?);
        }
        Ok(self)
    }

    /// keccak256 of the initcode, as consumed by CREATE2
    pub fn hash(&self) -> B256 {
        keccak256(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Transaction calldata for the proxy
    pub fn to_calldata(&self) -> Bytes {
        Bytes::from(self.bytes.clone())
    }

    /// Convert to hex string (with 0x prefix)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}
