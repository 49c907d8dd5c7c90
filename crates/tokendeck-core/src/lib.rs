//! # Tokendeck Core
//!
//! Core flow for the Tokendeck Polygon token dashboard: resolve a wallet
//! provider, guarantee the active chain is Polygon, bind ERC-20 contract
//! handles for the registered tokens, read balances and submit transfers.
//!
//! This library uses the [alloy](https://github.com/alloy-rs/alloy) framework
//! for all chain interactions; signing, RPC transport and ABI encoding are
//! alloy's job, not ours.
//!
//! ## Quickstart
//!
//! ```no_run
//! use tokendeck_core::prelude::*;
//!
//! # async fn run() -> Result<(), tokendeck_error::TokendeckError> {
//! let profile = ChainProfile::polygon();
//! let config = ProviderConfig {
//!     rpc_url: profile.primary_rpc().to_string(),
//!     private_key: std::env::var("TOKENDECK_PRIVATE_KEY").ok(),
//! };
//! let client = resolve_provider(&config)?;
//! ensure_chain(client.backend()?.as_ref(), &profile).await?;
//!
//! let mut registry = TokenRegistry::with_defaults();
//! registry.bind_contracts(&client)?;
//!
//! let account = client.account()?;
//! let report = refresh_balances(&registry, &registry.tokens(), account).await;
//! for entry in &report.entries {
//!     match &entry.balance {
//!         Ok(amount) => println!("{}: {}", entry.symbol, amount.display()),
//!         Err(_) => println!("{}: --", entry.symbol),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod amount;
pub mod balance;
pub mod chain;
pub mod erc20;
pub mod network;
pub mod provider;
pub mod registry;
pub mod session;
pub mod transfer;

pub use amount::TokenAmount;
pub use balance::{refresh_balances, BalanceReport, BalanceSource, TokenBalance};
pub use chain::{ChainProfile, POLYGON_CHAIN_ID};
pub use erc20::Erc20Handle;
pub use network::{ensure_chain, watch_token};
pub use provider::{
    account_from_response, resolve_provider, LocalWalletBackend, ProviderConfig, WalletBackend,
    WalletClient,
};
pub use registry::{TokenInfo, TokenRegistry};
pub use session::{Action, Session, SessionState};
pub use transfer::{submit_transfer, TransferOutcome, TransferRequest};

// Re-export alloy primitives for convenience
pub use alloy::primitives::{Address, U256};

/// Exposes the commonly used types for the dashboard flow.
pub mod prelude {
    pub use crate::amount::TokenAmount;
    pub use crate::balance::{refresh_balances, BalanceReport, BalanceSource};
    pub use crate::chain::{ChainProfile, POLYGON_CHAIN_ID};
    pub use crate::network::{ensure_chain, watch_token};
    pub use crate::provider::{resolve_provider, ProviderConfig, WalletBackend, WalletClient};
    pub use crate::registry::{TokenInfo, TokenRegistry};
    pub use crate::session::{Action, Session, SessionState};
    pub use crate::transfer::{submit_transfer, TransferRequest};
    pub use alloy::primitives::{Address, U256};
}
