//! Balance reading across the registered tokens.
//!
//! Failures are isolated per token: a failing `balanceOf` records its error
//! in the report and the remaining tokens are still attempted.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokendeck_error::Result;

use crate::amount::TokenAmount;
use crate::registry::{TokenInfo, TokenRegistry};

/// Anything that can answer a `balanceOf` read for a registered token.
/// The registry's bound contract handles are the production source; tests
/// substitute a scripted one.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Base-unit balance of `account` for the token with `symbol`.
    async fn balance_of(&self, symbol: &str, account: Address) -> Result<U256>;
}

#[async_trait]
impl BalanceSource for TokenRegistry {
    async fn balance_of(&self, symbol: &str, account: Address) -> Result<U256> {
        self.handle(symbol)?.balance_of(account).await
    }
}

/// One token's refreshed balance, or the error that kept it from loading.
pub struct TokenBalance {
    /// Token symbol
    pub symbol: String,
    /// The balance, ready for display, or the structured failure
    pub balance: Result<TokenAmount>,
}

/// The outcome of one balance refresh across all registered tokens.
pub struct BalanceReport {
    /// Per-token results, in the registry's display order
    pub entries: Vec<TokenBalance>,
}

impl BalanceReport {
    /// True when every token loaded.
    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|e| e.balance.is_ok())
    }

    /// True when at least one token failed to load.
    pub fn any_failed(&self) -> bool {
        !self.all_ok()
    }
}

/// Refreshes the balance of every token in `tokens` for `account`, issuing
/// exactly one read call per token. A single failing call does not abort the
/// batch; its error lands in the report entry and the log.
pub async fn refresh_balances<S: BalanceSource>(
    source: &S,
    tokens: &[&TokenInfo],
    account: Address,
) -> BalanceReport {
    let mut entries = Vec::new();
    for token in tokens {
        let balance = source
            .balance_of(&token.symbol, account)
            .await
            .map(|base| TokenAmount::from_base(base, token.decimals));
        if let Err(e) = &balance {
            log::warn!("balance refresh failed for {}: {e}", token.symbol);
        }
        entries.push(TokenBalance {
            symbol: token.symbol.clone(),
            balance,
        });
    }
    BalanceReport { entries }
}
