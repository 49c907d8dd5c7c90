//! Minimal ERC-20 contract handle: the two entry points the dashboard uses.

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::SolCall;
use tokendeck_error::{Result, TokendeckError};

use crate::registry::TokenInfo;

// The dashboard's two-entry ERC-20 interface.
sol! {
    function balanceOf(address account) external view returns (uint256);
    function transfer(address to, uint256 amount) external returns (bool);
}

/// A bound contract handle for one registered token: the contract address
/// plus the RPC endpoint calls go through. Built by
/// [`TokenRegistry::bind_contracts`](crate::registry::TokenRegistry::bind_contracts).
#[derive(Debug, Clone)]
pub struct Erc20Handle {
    symbol: String,
    address: Address,
    rpc_url: String,
}

impl Erc20Handle {
    /// Binds a handle for `token` against `rpc_url`.
    pub fn new(token: &TokenInfo, rpc_url: &str) -> Result<Self> {
        Ok(Self {
            symbol: token.symbol.clone(),
            address: token.contract_address()?,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// The token contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The symbol this handle is bound for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Read-only `balanceOf(owner)` call, returning base units.
    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        let provider = ProviderBuilder::new()
            .connect_http(self.rpc_url.parse().map_err(|e| self.url_error(e))?);
        let call_data = balanceOfCall { account: owner }.abi_encode();
        let tx = TransactionRequest::default()
            .to(self.address)
            .input(call_data.into());
        let raw = provider.call(tx).await.map_err(|e| self.call_error(e))?;
        balanceOfCall::abi_decode_returns(&raw).map_err(|e| self.call_error(e))
    }

    /// Signed, state-changing `transfer(to, amount)` from the signer's
    /// account. Resolves as soon as the node accepts the transaction and
    /// returns its hash; confirmation depth is not awaited.
    pub async fn transfer(
        &self,
        signer: &PrivateKeySigner,
        chain_id: u64,
        to: Address,
        amount: U256,
    ) -> Result<String> {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(self.rpc_url.parse().map_err(|e| self.url_error(e))?);
        let call_data = transferCall { to, amount }.abi_encode();
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call_data)
            .with_chain_id(chain_id);
        let pending_tx = provider
            .send_transaction(tx)
            .await
            .map_err(|e| TokendeckError::TransferFailed(format!("{}: {e}", self.symbol)))?;
        Ok(format!("{:?}", pending_tx.tx_hash()))
    }

    fn url_error(&self, e: impl std::fmt::Display) -> TokendeckError {
        TokendeckError::RpcConnection {
            url: self.rpc_url.clone(),
            reason: format!("invalid URL: {e}"),
        }
    }

    fn call_error(&self, e: impl std::fmt::Display) -> TokendeckError {
        TokendeckError::ContractCall {
            symbol: self.symbol.clone(),
            reason: e.to_string(),
        }
    }
}


// ============================================================================
// Integration Tests (require network access)
// ============================================================================
