//! Deterministic deployment proxy
//!
//! The proxy is a pre-deployed contract that runs `CREATE2` with a zero salt
//! over whatever initcode it receives as calldata and returns the created
//! address. The deployed address therefore depends only on the proxy address
//! and the initcode, never on the sender or its nonce.
//!
//! See <https://github.com/Zoltu/deterministic-deployment-proxy>.

use alloy::primitives::{address, Address, B256};
use alloy::rpc::types::TransactionRequest;

use crate::bytecode::Bytecode;
use crate::error::{Error, Result};

/// Well-known address of the deterministic deployment proxy
pub const DETERMINISTIC_DEPLOYMENT_PROXY_ADDRESS: Address =
    address!("7A0D94F55792C434d74a40883C6ed8545E406D12");

/// Handle on a deterministic deployment proxy at a configured address.
///
/// Only zero-salt proxies that hash the entire calldata as initcode are
/// supported. Proxies taking a salt prefix (e.g. `0x4e59b448...`) deploy to
/// a different address than [`DeterministicProxy::predict_address`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicProxy {
    address: Address,
}

impl DeterministicProxy {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Build the deployment transaction: the initcode is sent as calldata to
    /// the proxy instead of as a contract creation.
    pub fn deployment_tx(&self, initcode: &Bytecode) -> TransactionRequest {
        TransactionRequest::default()
            .to(self.address)
            .input(initcode.to_calldata().into())
    }

    /// Offline computation of the address the proxy will deploy `initcode` to
    pub fn predict_address(&self, initcode: &Bytecode) -> Address {
        self.address.create2(B256::ZERO, initcode.hash())
    }

    /// Decode the proxy's return data into the created address.
    ///
    /// The proxy returns the raw 20 address bytes. A left-padded 32-byte ABI
    /// word is accepted as well.
    pub fn decode_address(&self, output: &[u8]) -> Result<Address> {
        let address = match output.len() {
            0 => {
                return Err(Error::InvalidProxyOutput(
                    "proxy returned no data".to_string(),
                ))
            }
            20 => Address::from_slice(output),
            32 if output[..12].iter().all(|b| *b == 0) => Address::from_slice(&output[12..]),
            len => {
                return Err(Error::InvalidProxyOutput(format!(
                    "expected a 20-byte address, got {} bytes: 0x{}",
                    len,
                    hex::encode(output)
                )))
            }
        };

        if address.is_zero() {
            return Err(Error::InvalidProxyOutput(
                "proxy returned the zero address".to_string(),
            ));
        }

        Ok(address)
    }
}

impl Default for DeterministicProxy {
    fn default() -> Self {
        Self::new(DETERMINISTIC_DEPLOYMENT_PROXY_ADDRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::TxKind;

    #[test]
    fn test_default_proxy_address() {
        let proxy = DeterministicProxy::default();
        assert_eq!(
            proxy.address(),
            "0x7a0d94f55792c434d74a40883c6ed8545e406d12"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_deployment_tx_targets_proxy() {
        let proxy = DeterministicProxy::default();
        let initcode = Bytecode::from_hex("0x6080604052").unwrap();
        let tx = proxy.deployment_tx(&initcode);

        assert_eq!(tx.to, Some(TxKind::Call(proxy.address())));
        assert_eq!(
            tx.input.input().map(|b| b.to_vec()),
            Some(vec![0x60, 0x80, 0x60, 0x40, 0x52])
        );
    }

    #[test]
    fn test_predict_address_create2_vectors() {
        let initcode = Bytecode::from_hex("0x00").unwrap();

        let zero = DeterministicProxy::new(Address::ZERO);
        assert_eq!(
            zero.predict_address(&initcode),
            address!("4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38")
        );

        let deadbeef = DeterministicProxy::new(address!("deadbeef00000000000000000000000000000000"));
        assert_eq!(
            deadbeef.predict_address(&initcode),
            address!("B928f69Bb1D91Cd65274e3c79d8986362984fDA3")
        );
    }

    #[test]
    fn test_predict_address_hashes_full_calldata_with_zero_salt() {
        let proxy = DeterministicProxy::default();
        let mut calldata = vec![0x11u8; 32];
        calldata.extend_from_slice(&[0x60, 0x80, 0x60, 0x40, 0x52]);
        let initcode = Bytecode::from_bytes(calldata.clone()).unwrap();

        let expected = proxy
            .address()
            .create2(B256::ZERO, alloy::primitives::keccak256(&calldata));
        assert_eq!(proxy.predict_address(&initcode), expected);

        // A salt-prefixed proxy would treat the first word as salt
        let salted = proxy.address().create2(
            B256::from_slice(&calldata[..32]),
            alloy::primitives::keccak256(&calldata[32..]),
        );
        assert_ne!(proxy.predict_address(&initcode), salted);
    }

    #[test]
    fn test_predict_address_is_deterministic() {
        let proxy = DeterministicProxy::default();
        let first = proxy.predict_address(&Bytecode::from_hex("0x6080604052").unwrap());
        let second = proxy.predict_address(&Bytecode::from_hex("6080604052").unwrap());
        assert_eq!(first, second);

        let other = proxy.predict_address(&Bytecode::from_hex("0x6080604053").unwrap());
        assert_ne!(first, other);
    }

    #[test]
    fn test_decode_raw_address() {
        let proxy = DeterministicProxy::default();
        let expected = address!("1111111111111111111111111111111111111111");
        assert_eq!(proxy.decode_address(expected.as_slice()).unwrap(), expected);
    }

    #[test]
    fn test_decode_abi_word() {
        let proxy = DeterministicProxy::default();
        let expected = address!("2222222222222222222222222222222222222222");
        let mut word = vec![0u8; 12];
        word.extend_from_slice(expected.as_slice());
        assert_eq!(proxy.decode_address(&word).unwrap(), expected);
    }

    #[test]
    fn test_decode_invalid_output() {
        let proxy = DeterministicProxy::default();
        assert!(matches!(
            proxy.decode_address(&[]),
            Err(Error::InvalidProxyOutput(_))
        ));
        assert!(proxy.decode_address(&[1u8; 19]).is_err());
        assert!(proxy.decode_address(&[1u8; 32]).is_err());
        assert!(proxy.decode_address(&[0u8; 20]).is_err());
    }
}
