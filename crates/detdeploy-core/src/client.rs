//! Chain access used by the dispatcher
//!
//! [`ChainClient`] is the seam between deployment logic and the network.
//! [`ProviderClient`] implements it on top of an alloy provider that already
//! carries a signing wallet; tests substitute in-memory implementations.

use std::time::Duration;

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use crate::error::{Error, Result};

/// How long to wait for a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationWait {
    /// Zero means submit and return without waiting for a receipt
    pub confirmations: u64,
    pub timeout: Option<Duration>,
}

/// A submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentTransaction {
    pub tx_hash: TxHash,
    /// Set once a receipt has been observed
    pub block_number: Option<u64>,
}

/// Signer-backed access to a chain node
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Runtime code stored at an address
    async fn code_at(&self, address: Address) -> Result<Bytes>;

    /// Execute a transaction as a read-only call from the signer's account
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes>;

    /// Sign and broadcast a transaction, then wait as requested
    async fn send(&self, tx: TransactionRequest, wait: ConfirmationWait)
        -> Result<SentTransaction>;
}

/// [`ChainClient`] over an alloy provider with a wallet filler
#[derive(Debug, Clone)]
pub struct ProviderClient<P> {
    provider: P,
    from: Address,
}

impl<P> ProviderClient<P> {
    /// `from` is the signer address used for read-only calls
    pub fn new(provider: P, from: Address) -> Self {
        Self { provider, from }
    }

    pub fn from_address(&self) -> Address {
        self.from
    }
}

#[async_trait]
impl<P: Provider> ChainClient for ProviderClient<P> {
    async fn code_at(&self, address: Address) -> Result<Bytes> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| Error::Rpc(format!("Failed to fetch code at {}: {}", address, e)))
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let tx = tx.clone().from(self.from);
        self.provider
            .call(tx)
            .await
            .map_err(|e| Error::Rpc(format!("Deployment call failed: {}", e)))
    }

    async fn send(
        &self,
        tx: TransactionRequest,
        wait: ConfirmationWait,
    ) -> Result<SentTransaction> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| Error::Rpc(format!("Failed to send deployment transaction: {}", e)))?;

        let tx_hash = *pending.tx_hash();

        if wait.confirmations == 0 {
            return Ok(SentTransaction {
                tx_hash,
                block_number: None,
            });
        }

        let receipt = pending
            .with_required_confirmations(wait.confirmations)
            .with_timeout(wait.timeout)
            .get_receipt()
            .await
            .map_err(|e| Error::Confirmation(format!("{}: {}", tx_hash, e)))?;

        if !receipt.status() {
            return Err(Error::TransactionReverted(tx_hash));
        }

        Ok(SentTransaction {
            tx_hash,
            block_number: receipt.block_number(),
        })
    }
}
