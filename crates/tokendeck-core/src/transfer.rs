//! Transfer submission: validate, sign, send, report the hash.

use alloy::primitives::Address;
use std::str::FromStr;
use tokendeck_error::{Result, TokendeckError};

use crate::amount::TokenAmount;
use crate::chain::ChainProfile;
use crate::network::ensure_chain;
use crate::provider::WalletClient;
use crate::registry::TokenRegistry;

/// A user-supplied transfer, exactly as entered. Validated before
/// submission, never persisted.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Symbol of the registered token to send
    pub token_symbol: String,
    /// Recipient address as typed
    pub recipient: String,
    /// Amount as typed, in display units
    pub amount: String,
}

/// Result of an accepted transfer: the transaction hash the node returned.
/// Acceptance, not confirmation depth.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The transaction hash
    pub tx_hash: String,
}

/// Validates the user-entered recipient and amount, in that order, failing
/// fast. No network call happens here; a rejected request never leaves the
/// process.
pub fn validate_transfer(
    request: &TransferRequest,
    decimals: u8,
) -> Result<(Address, TokenAmount)> {
    let recipient = Address::from_str(request.recipient.trim()).map_err(|e| {
        TokendeckError::InvalidRecipient {
            recipient: request.recipient.clone(),
            reason: e.to_string(),
        }
    })?;
    let amount = TokenAmount::parse(&request.amount, decimals)?;
    Ok((recipient, amount))
}

/// Submits a token transfer from the connected account.
///
/// Order of operations: validate recipient then amount (rejecting before any
/// network call), require a signing wallet, re-run the chain guarantee, then
/// send the signed `transfer` and await the transaction hash. The caller is
/// expected to refresh balances and history once this returns.
pub async fn submit_transfer(
    client: &WalletClient,
    registry: &TokenRegistry,
    profile: &ChainProfile,
    request: &TransferRequest,
) -> Result<TransferOutcome> {
    let token = registry
        .get(&request.token_symbol)
        .ok_or_else(|| TokendeckError::UnknownToken(request.token_symbol.clone()))?;
    let (recipient, amount) = validate_transfer(request, token.decimals)?;

    let signer = client.signer()?;
    // Every signing operation runs behind the chain guarantee.
    ensure_chain(client.backend()?.as_ref(), profile).await?;

    let handle = registry.handle(&token.symbol)?;
    let tx_hash = handle
        .transfer(signer, profile.chain_id, recipient, amount.base())
        .await?;
    log::info!(
        "transfer accepted: {} {} to {recipient} ({tx_hash})",
        amount.display(),
        token.symbol
    );
    Ok(TransferOutcome { tx_hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{resolve_provider, ProviderConfig};
    use alloy::primitives::U256;

    const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f5fFb9";
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn request(recipient: &str, amount: &str) -> TransferRequest {
        TransferRequest {
            token_symbol: "COT".to_string(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        }
    }

    fn read_only_client() -> WalletClient {
        resolve_provider(&ProviderConfig {
            rpc_url: "https://polygon-rpc.com".to_string(),
            private_key: None,
        })
        .unwrap()
    }

    fn signing_client() -> WalletClient {
        resolve_provider(&ProviderConfig {
            rpc_url: "https://polygon-rpc.com".to_string(),
            private_key: Some(TEST_PRIVATE_KEY.to_string()),
        })
        .unwrap()
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_accepts_checksummed_recipient() {
        let (recipient, amount) = validate_transfer(&request(RECIPIENT, "1.5"), 18).unwrap();
        assert!(format!("{recipient}").eq_ignore_ascii_case(RECIPIENT));
        assert_eq!(amount.base(), U256::from(1_500_000_000_000_000_000u128));
    }

    #[test]
    fn test_validate_accepts_lowercase_recipient() {
        let lower = RECIPIENT.to_lowercase();
        assert!(validate_transfer(&request(&lower, "1"), 18).is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_recipient() {
        for bad in ["", "0x12", "not-an-address", "0xZZ42d35Cc6634C0532925a3b844Bc9e7595f5fFb9"] {
            let err = validate_transfer(&request(bad, "1"), 18).unwrap_err();
            assert!(
                matches!(err, TokendeckError::InvalidRecipient { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        for bad in ["0", "-5", "abc", ""] {
            let err = validate_transfer(&request(RECIPIENT, bad), 18).unwrap_err();
            assert!(
                matches!(err, TokendeckError::InvalidAmount { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_recipient_checked_before_amount() {
        // both fields invalid: the recipient error must win
        let err = validate_transfer(&request("garbage", "abc"), 18).unwrap_err();
        assert!(matches!(err, TokendeckError::InvalidRecipient { .. }));
    }

    // ========================================================================
    // Submission Ordering Tests (no network)
    // ========================================================================

    #[tokio::test]
    async fn test_submit_rejects_invalid_recipient_before_anything() {
        let registry = TokenRegistry::with_defaults(); // unbound on purpose
        let result = submit_transfer(
            &read_only_client(),
            &registry,
            &ChainProfile::polygon(),
            &request("nonsense", "1"),
        )
        .await;
        assert!(matches!(result, Err(TokendeckError::InvalidRecipient { .. })));
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_amount_before_anything() {
        let registry = TokenRegistry::with_defaults();
        let result = submit_transfer(
            &read_only_client(),
            &registry,
            &ChainProfile::polygon(),
            &request(RECIPIENT, "-5"),
        )
        .await;
        assert!(matches!(result, Err(TokendeckError::InvalidAmount { .. })));
    }

    #[tokio::test]
    async fn test_submit_requires_signing_wallet() {
        let registry = TokenRegistry::with_defaults();
        // valid inputs against a read-only client: validation passes, the
        // write path is refused
        let result = submit_transfer(
            &read_only_client(),
            &registry,
            &ChainProfile::polygon(),
            &request(RECIPIENT, "1.5"),
        )
        .await;
        assert!(matches!(result, Err(TokendeckError::NoWallet)));
    }

    #[tokio::test]
    async fn test_submit_unknown_token() {
        let registry = TokenRegistry::with_defaults();
        let mut req = request(RECIPIENT, "1");
        req.token_symbol = "DOGE".to_string();
        let result = submit_transfer(
            &read_only_client(),
            &registry,
            &ChainProfile::polygon(),
            &req,
        )
        .await;
        assert!(matches!(result, Err(TokendeckError::UnknownToken(_))));
    }

    #[tokio::test]
    async fn test_submit_requires_bound_contracts() {
        // signing client, chain guarantee passes in-process, but contracts
        // were never bound
        let registry = TokenRegistry::with_defaults();
        let result = submit_transfer(
            &signing_client(),
            &registry,
            &ChainProfile::polygon(),
            &request(RECIPIENT, "1"),
        )
        .await;
        assert!(matches!(result, Err(TokendeckError::NotConnected(_))));
    }
}
