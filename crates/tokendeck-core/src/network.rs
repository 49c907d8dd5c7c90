//! Network guarantee: make the wallet's active chain the target chain before
//! anything needs signing.

use serde_json::json;
use tokendeck_error::{Result, TokendeckError, UNRECOGNIZED_CHAIN_CODE};

use crate::chain::ChainProfile;
use crate::provider::WalletBackend;
use crate::registry::TokenInfo;

/// Ensures the wallet is on `profile`'s chain.
///
/// Issues a `wallet_switchEthereumChain` request; when the wallet answers
/// with code 4902 (chain not added) a single `wallet_addEthereumChain`
/// request follows, carrying the profile's RPC URLs, native currency and
/// explorer URL. The add itself activates the chain, so no second switch is
/// sent. Any other wallet error propagates unchanged.
///
/// Callers run this before every signing operation.
pub async fn ensure_chain(backend: &dyn WalletBackend, profile: &ChainProfile) -> Result<()> {
    let switch = backend
        .request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": profile.chain_id_hex() }]),
        )
        .await;
    match switch {
        Ok(_) => Ok(()),
        Err(TokendeckError::WalletRequest { code, .. }) if code == UNRECOGNIZED_CHAIN_CODE => {
            log::debug!(
                "chain 0x{:x} not known to wallet, requesting add",
                profile.chain_id
            );
            backend
                .request("wallet_addEthereumChain", json!([profile.add_chain_params()]))
                .await
                .map_err(|e| TokendeckError::ChainUnavailable {
                    chain_id: profile.chain_id,
                    reason: e.to_string(),
                })?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Asks the wallet to track a registered token (`wallet_watchAsset`).
pub async fn watch_token(backend: &dyn WalletBackend, token: &TokenInfo) -> Result<()> {
    backend
        .request(
            "wallet_watchAsset",
            json!({
                "type": "ERC20",
                "options": {
                    "address": token.address,
                    "symbol": token.symbol,
                    "decimals": token.decimals,
                    "image": token.logo_url,
                },
            }),
        )
        .await?;
    Ok(())
}
