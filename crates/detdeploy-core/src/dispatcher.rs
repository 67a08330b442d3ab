//! Deployment dispatcher
//!
//! Sequence for one deployment:
//!
//! 1. Point the initcode transaction at the proxy.
//! 2. Read-only call to learn the address the proxy will create.
//! 3. Broadcast the same transaction and wait for confirmations.
//! 4. Run the enabled effect handlers.
//!
//! Any failure aborts the whole run. A failing effect leaves the contract
//! deployed but the run is still reported as failed.

use crate::bytecode::Bytecode;
use crate::client::{ChainClient, ConfirmationWait};
use crate::effect::DeploymentEffect;
use crate::error::{Error, Result};
use crate::types::{DeploymentRequest, DeploymentResult};

pub struct Dispatcher<C> {
    client: C,
    effects: Vec<Box<dyn DeploymentEffect>>,
}

impl<C: ChainClient> Dispatcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            effects: Vec::new(),
        }
    }

    /// Register a handler. It only runs when the request enables its kind.
    pub fn with_effect<E: DeploymentEffect + 'static>(mut self, effect: E) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        initcode: &Bytecode,
    ) -> Result<DeploymentResult> {
        self.check_handlers(request)?;

        let proxy = request.proxy();

        if self.client.code_at(proxy.address()).await?.is_empty() {
            return Err(Error::ProxyNotDeployed(proxy.address()));
        }

        let tx = proxy.deployment_tx(initcode);
        let output = self.client.call(&tx).await?;
        let address = proxy.decode_address(&output)?;

        let sent = self
            .client
            .send(
                tx,
                ConfirmationWait {
                    confirmations: request.confirmations(),
                    timeout: request.timeout(),
                },
            )
            .await?;

        // Unconfirmed deployments cannot be checked yet
        if request.confirmations() > 0 && self.client.code_at(address).await?.is_empty() {
            return Err(Error::DeploymentMissing(address));
        }

        let deployment = DeploymentResult {
            contract_name: request.contract_name().to_string(),
            address,
            tx_hash: sent.tx_hash,
            block_number: sent.block_number,
        };

        self.run_effects(request, &deployment).await?;

        Ok(deployment)
    }

    /// Every enabled effect needs a handler before anything is broadcast
    fn check_handlers(&self, request: &DeploymentRequest) -> Result<()> {
        for kind in request.enabled_effects() {
            if !self.effects.iter().any(|e| e.kind() == kind) {
                return Err(Error::MissingEffect(kind));
            }
        }
        Ok(())
    }

    async fn run_effects(
        &self,
        request: &DeploymentRequest,
        deployment: &DeploymentResult,
    ) -> Result<()> {
        for kind in request.enabled_effects() {
            for handler in self.effects.iter().filter(|e| e.kind() == kind) {
                handler.apply(deployment).await?;
            }
        }
        Ok(())
    }
}
