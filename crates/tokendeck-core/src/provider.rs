//! Wallet provider resolution.
//!
//! The dashboard prefers a signing wallet (a configured private key standing
//! in for a browser-injected provider) and falls back to a read-only public
//! RPC endpoint when none is available. Wallet-side requests travel through
//! the [`WalletBackend`] trait as a JSON-RPC style method/params envelope so
//! chain switching and account requests look the same against a real wallet
//! or a scripted test double.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokendeck_error::{Result, TokendeckError, UNRECOGNIZED_CHAIN_CODE};

/// Wallet-side request interface: a method name plus JSON params, answered
/// with a JSON value or a coded error, mirroring the EIP-1193 envelope.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// Issues a wallet request. Errors carry the wallet's numeric code as
    /// [`TokendeckError::WalletRequest`].
    async fn request(&self, method: &str, params: Value) -> Result<Value>;
}

/// Inputs to provider resolution.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// RPC endpoint used for reads and, with a signer, for writes.
    pub rpc_url: String,
    /// Hex private key of the signing wallet, if one is configured.
    pub private_key: Option<String>,
}

/// The resolved client handle: an RPC endpoint, optionally paired with a
/// signer and its wallet backend.
#[derive(Clone)]
pub struct WalletClient {
    rpc_url: String,
    signer: Option<PrivateKeySigner>,
    backend: Option<Arc<dyn WalletBackend>>,
}

impl WalletClient {
    /// The RPC endpoint this client reads through.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// True when a signing wallet is present; read-only clients cannot
    /// connect or transfer.
    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    /// The signer, or [`TokendeckError::NoWallet`] for a read-only client.
    pub fn signer(&self) -> Result<&PrivateKeySigner> {
        self.signer.as_ref().ok_or(TokendeckError::NoWallet)
    }

    /// The wallet backend, or [`TokendeckError::NoWallet`] for a read-only
    /// client.
    pub fn backend(&self) -> Result<&Arc<dyn WalletBackend>> {
        self.backend.as_ref().ok_or(TokendeckError::NoWallet)
    }

    /// Address of the signing account.
    pub fn account(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("rpc_url", &self.rpc_url)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// Resolves the wallet provider for this run.
///
/// A configured private key yields a signing client backed by
/// [`LocalWalletBackend`]. Without one the client is read-only against the
/// public RPC endpoint and a notice is logged: connect and transfer will
/// refuse with [`TokendeckError::NoWallet`].
pub fn resolve_provider(config: &ProviderConfig) -> Result<WalletClient> {
    match &config.private_key {
        Some(key) => {
            let signer = parse_private_key(key)?;
            let backend = Arc::new(LocalWalletBackend::new(signer.address()));
            Ok(WalletClient {
                rpc_url: config.rpc_url.clone(),
                signer: Some(signer),
                backend: Some(backend),
            })
        }
        None => {
            log::warn!(
                "no wallet configured; falling back to read-only RPC at {}",
                config.rpc_url
            );
            Ok(WalletClient {
                rpc_url: config.rpc_url.clone(),
                signer: None,
                backend: None,
            })
        }
    }
}

fn parse_private_key(private_key: &str) -> Result<PrivateKeySigner> {
    let key = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(key)
        .map_err(|e| TokendeckError::Config(format!("invalid private key hex: {e}")))?;
    PrivateKeySigner::from_slice(&bytes)
        .map_err(|e| TokendeckError::Config(format!("invalid private key: {e}")))
}

/// In-process wallet backend answering the EIP-1193 style requests the
/// dashboard issues. It tracks which chains the wallet knows about and which
/// one is active, so the switch-or-add flow behaves like a real wallet:
/// switching to an unknown chain fails with code 4902 and a subsequent
/// add-chain request activates it.
pub struct LocalWalletBackend {
    account: Address,
    known_chains: Mutex<HashSet<u64>>,
    active_chain: Mutex<u64>,
}

/// Chain a freshly created wallet backend starts on (Ethereum mainnet).
const DEFAULT_CHAIN_ID: u64 = 1;

impl LocalWalletBackend {
    /// New backend for the given account, starting on Ethereum mainnet with
    /// no other chains added.
    pub fn new(account: Address) -> Self {
        Self {
            account,
            known_chains: Mutex::new(HashSet::from([DEFAULT_CHAIN_ID])),
            active_chain: Mutex::new(DEFAULT_CHAIN_ID),
        }
    }

    /// The chain the wallet currently has active.
    pub fn active_chain(&self) -> u64 {
        *self.active_chain.lock().expect("chain lock")
    }

    fn switch_chain(&self, params: &Value) -> Result<Value> {
        let chain_id = chain_id_from_params(params, "wallet_switchEthereumChain")?;
        let known = self.known_chains.lock().expect("chain lock");
        if !known.contains(&chain_id) {
            return Err(TokendeckError::WalletRequest {
                method: "wallet_switchEthereumChain".to_string(),
                code: UNRECOGNIZED_CHAIN_CODE,
                message: format!("unrecognized chain id 0x{chain_id:x}"),
            });
        }
        *self.active_chain.lock().expect("chain lock") = chain_id;
        Ok(Value::Null)
    }

    fn add_chain(&self, params: &Value) -> Result<Value> {
        let chain_id = chain_id_from_params(params, "wallet_addEthereumChain")?;
        self.known_chains.lock().expect("chain lock").insert(chain_id);
        // Adding a chain also activates it, as wallets do.
        *self.active_chain.lock().expect("chain lock") = chain_id;
        Ok(Value::Null)
    }
}

#[async_trait]
impl WalletBackend for LocalWalletBackend {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "eth_requestAccounts" => Ok(json!([format!("{:?}", self.account)])),
            "wallet_switchEthereumChain" => self.switch_chain(&params),
            "wallet_addEthereumChain" => self.add_chain(&params),
            "wallet_watchAsset" => Ok(json!(true)),
            other => Err(TokendeckError::WalletRequest {
                method: other.to_string(),
                code: -32601,
                message: "method not found".to_string(),
            }),
        }
    }
}

fn chain_id_from_params(params: &Value, method: &str) -> Result<u64> {
    let hex_id = params
        .get(0)
        .and_then(|p| p.get("chainId"))
        .and_then(Value::as_str)
        .ok_or_else(|| TokendeckError::WalletRequest {
            method: method.to_string(),
            code: -32602,
            message: "missing chainId".to_string(),
        })?;
    let digits = hex_id.strip_prefix("0x").unwrap_or(hex_id);
    u64::from_str_radix(digits, 16).map_err(|_| TokendeckError::WalletRequest {
        method: method.to_string(),
        code: -32602,
        message: format!("malformed chainId '{hex_id}'"),
    })
}

/// Parses the first account out of an `eth_requestAccounts` response.
pub fn account_from_response(response: &Value) -> Result<Address> {
    let first = response
        .get(0)
        .and_then(Value::as_str)
        .ok_or_else(|| TokendeckError::NotConnected("wallet returned no accounts".to_string()))?;
    Address::from_str(first).map_err(|e| {
        TokendeckError::NotConnected(format!("wallet returned malformed account: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const RPC: &str = "https://polygon-rpc.com";

    fn signing_config() -> ProviderConfig {
        ProviderConfig {
            rpc_url: RPC.to_string(),
            private_key: Some(TEST_PRIVATE_KEY.to_string()),
        }
    }

    // ========================================================================
    // Resolution Tests
    // ========================================================================

    #[test]
    fn test_resolve_signing_provider() {
        let client = resolve_provider(&signing_config()).unwrap();
        assert!(client.can_sign());
        assert!(client.signer().is_ok());
        assert!(client.backend().is_ok());
        assert_eq!(client.rpc_url(), RPC);
    }

    #[test]
    fn test_resolve_read_only_fallback() {
        let client = resolve_provider(&ProviderConfig {
            rpc_url: RPC.to_string(),
            private_key: None,
        })
        .unwrap();
        assert!(!client.can_sign());
        assert!(matches!(client.signer(), Err(TokendeckError::NoWallet)));
        assert!(matches!(client.backend(), Err(TokendeckError::NoWallet)));
        assert!(matches!(client.account(), Err(TokendeckError::NoWallet)));
    }

    #[test]
    fn test_resolve_key_without_prefix() {
        let client = resolve_provider(&ProviderConfig {
            rpc_url: RPC.to_string(),
            private_key: Some(TEST_PRIVATE_KEY.strip_prefix("0x").unwrap().to_string()),
        })
        .unwrap();
        assert!(client.can_sign());
    }

    #[test]
    fn test_resolve_rejects_malformed_key() {
        let result = resolve_provider(&ProviderConfig {
            rpc_url: RPC.to_string(),
            private_key: Some("not-a-key".to_string()),
        });
        assert!(matches!(result, Err(TokendeckError::Config(_))));
    }

    #[test]
    fn test_resolve_deterministic_account() {
        let a = resolve_provider(&signing_config()).unwrap();
        let b = resolve_provider(&signing_config()).unwrap();
        assert_eq!(a.account().unwrap(), b.account().unwrap());
    }

    // ========================================================================
    // Local Backend Tests
    // ========================================================================

    #[tokio::test]
    async fn test_request_accounts() {
        let client = resolve_provider(&signing_config()).unwrap();
        let backend = client.backend().unwrap();
        let response = backend
            .request("eth_requestAccounts", Value::Null)
            .await
            .unwrap();
        let account = account_from_response(&response).unwrap();
        assert_eq!(account, client.account().unwrap());
    }

    #[tokio::test]
    async fn test_switch_to_unknown_chain_is_4902() {
        let backend = LocalWalletBackend::new(Address::ZERO);
        let err = backend
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": "0x89" }]),
            )
            .await
            .unwrap_err();
        match err {
            TokendeckError::WalletRequest { code, .. } => {
                assert_eq!(code, UNRECOGNIZED_CHAIN_CODE)
            }
            other => panic!("expected WalletRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_chain_activates() {
        let backend = LocalWalletBackend::new(Address::ZERO);
        assert_eq!(backend.active_chain(), 1);
        backend
            .request(
                "wallet_addEthereumChain",
                json!([{ "chainId": "0x89", "chainName": "Polygon Mainnet" }]),
            )
            .await
            .unwrap();
        assert_eq!(backend.active_chain(), 137);

        // the chain is now known, so switching succeeds
        backend
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": "0x89" }]),
            )
            .await
            .unwrap();
        assert_eq!(backend.active_chain(), 137);
    }

    #[tokio::test]
    async fn test_unknown_method_rejected() {
        let backend = LocalWalletBackend::new(Address::ZERO);
        let err = backend
            .request("eth_signTypedData_v4", Value::Null)
            .await
            .unwrap_err();
        match err {
            TokendeckError::WalletRequest { code, .. } => assert_eq!(code, -32601),
            other => panic!("expected WalletRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_account_from_response_rejects_empty() {
        assert!(account_from_response(&json!([])).is_err());
        assert!(account_from_response(&json!(["nonsense"])).is_err());
    }
}
