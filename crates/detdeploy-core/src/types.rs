use std::fmt;
use std::time::Duration;

/// Re-export alloy types for convenience
pub use alloy::primitives::{Address, TxHash};

use crate::proxy::DeterministicProxy;

// =============================================================================
// Effects
// =============================================================================

/// Optional side effect run after a successful deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Expose the address as a CI output variable
    SetOutput,
    /// Print the address in the console
    PrintAddress,
    /// Submit the source for verification on the block explorer
    VerifyEtherscan,
}

impl EffectKind {
    /// Every effect, in the order they are applied
    pub const ALL: [EffectKind; 3] = [
        EffectKind::SetOutput,
        EffectKind::PrintAddress,
        EffectKind::VerifyEtherscan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::SetOutput => "set-output",
            EffectKind::PrintAddress => "print-address",
            EffectKind::VerifyEtherscan => "verify-etherscan",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Request
// =============================================================================

/// Parameters of a single deployment. Built once, then read-only.
///
/// The proxy is supplied by configuration through [`DeterministicProxy`];
/// there is no way to set it from per-invocation flags.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    proxy: DeterministicProxy,
    contract_name: String,
    confirmations: u64,
    timeout: Option<Duration>,
    print_address: bool,
    set_output: bool,
    verify_etherscan: bool,
}

impl DeploymentRequest {
    pub const DEFAULT_CONFIRMATIONS: u64 = 2;

    /// Create a request with the default flags: wait for 2 confirmations,
    /// print the address, no CI output, no verification.
    pub fn new(proxy: DeterministicProxy, contract_name: impl Into<String>) -> Self {
        Self {
            proxy,
            contract_name: contract_name.into(),
            confirmations: Self::DEFAULT_CONFIRMATIONS,
            timeout: None,
            print_address: true,
            set_output: false,
            verify_etherscan: false,
        }
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_print_address(mut self, enabled: bool) -> Self {
        self.print_address = enabled;
        self
    }

    pub fn with_set_output(mut self, enabled: bool) -> Self {
        self.set_output = enabled;
        self
    }

    pub fn with_verify_etherscan(mut self, enabled: bool) -> Self {
        self.verify_etherscan = enabled;
        self
    }

    pub fn proxy(&self) -> &DeterministicProxy {
        &self.proxy
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn confirmations(&self) -> u64 {
        self.confirmations
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::SetOutput => self.set_output,
            EffectKind::PrintAddress => self.print_address,
            EffectKind::VerifyEtherscan => self.verify_etherscan,
        }
    }

    /// Effects switched on for this request, in application order
    pub fn enabled_effects(&self) -> Vec<EffectKind> {
        EffectKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}

// =============================================================================
// Result
// =============================================================================

/// Outcome of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_name: String,
    /// Address returned by the proxy's read-only call
    pub address: Address,
    pub tx_hash: TxHash,
    /// Inclusion block, known only when confirmations were awaited
    pub block_number: Option<u64>,
}

impl DeploymentResult {
    /// Checksummed address string
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = DeploymentRequest::new(DeterministicProxy::default(), "CeaErc20");

        assert_eq!(request.contract_name(), "CeaErc20");
        assert_eq!(request.confirmations(), 2);
        assert!(request.timeout().is_none());
        assert_eq!(request.enabled_effects(), vec![EffectKind::PrintAddress]);
    }

    #[test]
    fn test_enabled_effects_order() {
        let request = DeploymentRequest::new(DeterministicProxy::default(), "CeaErc20")
            .with_verify_etherscan(true)
            .with_set_output(true);

        assert_eq!(
            request.enabled_effects(),
            vec![
                EffectKind::SetOutput,
                EffectKind::PrintAddress,
                EffectKind::VerifyEtherscan
            ]
        );
    }

    #[test]
    fn test_all_effects_disabled() {
        let request = DeploymentRequest::new(DeterministicProxy::default(), "CeaErc20")
            .with_print_address(false);

        assert!(request.enabled_effects().is_empty());
        assert!(!request.is_enabled(EffectKind::SetOutput));
        assert!(!request.is_enabled(EffectKind::VerifyEtherscan));
    }

    #[test]
    fn test_effect_kind_display() {
        assert_eq!(EffectKind::SetOutput.to_string(), "set-output");
        assert_eq!(EffectKind::PrintAddress.to_string(), "print-address");
        assert_eq!(EffectKind::VerifyEtherscan.to_string(), "verify-etherscan");
    }
}
