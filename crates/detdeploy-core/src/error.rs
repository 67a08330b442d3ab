use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::types::EffectKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("No deterministic deployment proxy deployed at {0}")]
    ProxyNotDeployed(Address),

    #[error("Invalid proxy output: {0}")]
    InvalidProxyOutput(String),

    #[error("Transaction reverted: {0}")]
    TransactionReverted(TxHash),

    #[error("Confirmation wait failed: {0}")]
    Confirmation(String),

    #[error("No code found at {0} after the deployment transaction landed")]
    DeploymentMissing(Address),

    #[error("{kind} failed: {message}")]
    Effect { kind: EffectKind, message: String },

    #[error("No handler registered for enabled effect: {0}")]
    MissingEffect(EffectKind),

    #[error("Invalid bytecode: {0}")]
    InvalidBytecode(String),

    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Error {
    /// Wrap a failure raised by a post-deployment effect handler
    pub fn effect(kind: EffectKind, err: impl std::fmt::Display) -> Self {
        Error::Effect {
            kind,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
