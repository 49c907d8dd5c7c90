//! # Tokendeck Error
//!
//! This crate provides the unified error type for the Tokendeck Polygon token
//! dashboard. Every fallible operation in the workspace funnels into
//! [`TokendeckError`] so callers and tests always see a structured error, even
//! when the user-facing surface only shows a generic notice.
//!
//! ## Error Categories
//!
//! - *no-wallet* — no signing provider available, write paths disabled
//! - *chain-mismatch* — the wallet rejected both switch and add
//! - *user-rejected* — the user declined a wallet prompt
//! - *validation* — malformed recipient or amount, rejected before any network call
//! - *remote-failure* — RPC or explorer HTTP error, detail logged not shown
//!
//! ## Example
//!
//! ```
//! use tokendeck_error::{TokendeckError, Result};
//!
//! fn validate_recipient(addr: &str) -> Result<()> {
//!     if !addr.starts_with("0x") {
//!         return Err(TokendeckError::InvalidRecipient {
//!             recipient: addr.to_string(),
//!             reason: "missing 0x prefix".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// EIP-1193 error code a wallet returns when the requested chain has not been
/// added yet. `ensure_chain` reacts to this code and no other.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// EIP-1193 error code for a request the user declined in the wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

/// The main error type for Tokendeck operations.
#[derive(Error, Debug)]
pub enum TokendeckError {
    // ============ Provider Errors ============
    /// No signing wallet is available; only read operations work
    #[error("no wallet detected, write operations unavailable")]
    NoWallet,

    /// The wallet returned a JSON-RPC style error with a numeric code
    #[error("wallet request '{method}' failed with code {code}: {message}")]
    WalletRequest {
        /// The request method that failed
        method: String,
        /// Numeric error code reported by the wallet
        code: i64,
        /// Error message reported by the wallet
        message: String,
    },

    /// The user declined a wallet prompt
    #[error("user rejected wallet request '{method}'")]
    UserRejected {
        /// The request the user declined
        method: String,
    },

    // ============ Chain Errors ============
    /// The wallet rejected both the switch-chain and add-chain requests
    #[error("could not activate chain {chain_id}: {reason}")]
    ChainUnavailable {
        /// Target chain id
        chain_id: u64,
        /// Reason reported by the wallet
        reason: String,
    },

    // ============ Validation Errors ============
    /// The transfer recipient is not a well-formed address
    #[error("invalid recipient '{recipient}': {reason}")]
    InvalidRecipient {
        /// The rejected recipient string
        recipient: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The transfer amount is not a positive finite decimal
    #[error("invalid amount '{amount}': {reason}")]
    InvalidAmount {
        /// The rejected amount string
        amount: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Amount arithmetic overflowed U256
    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    // ============ Session Errors ============
    /// An operation was invoked before a wallet connection succeeded
    #[error("not connected: {0}")]
    NotConnected(String),

    /// An action was invoked while another one is still in flight
    #[error("action '{action}' already in flight")]
    ActionInFlight {
        /// Name of the busy action
        action: String,
    },

    /// A token symbol is not present in the registry
    #[error("unknown token: {0}")]
    UnknownToken(String),

    // ============ Remote Failures ============
    /// A contract read or write call failed at the RPC layer
    #[error("contract call failed for {symbol}: {reason}")]
    ContractCall {
        /// Token the call targeted
        symbol: String,
        /// Underlying failure detail
        reason: String,
    },

    /// Transaction submission failed (rejection, gas, balance, RPC)
    #[error("transfer submission failed: {0}")]
    TransferFailed(String),

    /// The explorer HTTP API call failed or returned a malformed body
    #[error("explorer request failed: {0}")]
    Explorer(String),

    /// Generic RPC connection failure
    #[error("RPC connection failed: {url} - {reason}")]
    RpcConnection {
        /// RPC URL
        url: String,
        /// Error reason
        reason: String,
    },

    // ============ Configuration ============
    /// Configuration is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenient Result type using TokendeckError
pub type Result<T> = std::result::Result<T, TokendeckError>;

/// The broad category an error falls into, matching the dashboard's
/// user-facing taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No signing provider present
    NoWallet,
    /// Chain could not be activated
    ChainMismatch,
    /// User declined a wallet prompt
    UserRejected,
    /// Input rejected before any network call
    Validation,
    /// RPC/HTTP failure or malformed response
    RemoteFailure,
    /// Session misuse (not connected, re-entrant action)
    Session,
    /// Bad configuration
    Config,
}

impl TokendeckError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TokendeckError::NoWallet => ErrorCategory::NoWallet,
            TokendeckError::ChainUnavailable { .. } => ErrorCategory::ChainMismatch,
            TokendeckError::UserRejected { .. } => ErrorCategory::UserRejected,
            TokendeckError::InvalidRecipient { .. }
            | TokendeckError::InvalidAmount { .. }
            | TokendeckError::AmountOverflow(_) => ErrorCategory::Validation,
            TokendeckError::NotConnected(_)
            | TokendeckError::ActionInFlight { .. }
            | TokendeckError::UnknownToken(_) => ErrorCategory::Session,
            TokendeckError::Config(_) => ErrorCategory::Config,
            _ => ErrorCategory::RemoteFailure,
        }
    }

    /// Returns the generic notice shown to the user for this error.
    ///
    /// Structured detail stays on the error itself (and in the log); the
    /// user-facing surface only sees these short messages.
    pub fn user_message(&self) -> &'static str {
        match self {
            TokendeckError::NoWallet => {
                "No wallet detected. Connect and transfer are unavailable."
            }
            TokendeckError::ChainUnavailable { .. } => {
                "Could not switch to the Polygon network."
            }
            TokendeckError::InvalidRecipient { .. } => "Invalid recipient address.",
            TokendeckError::InvalidAmount { .. } | TokendeckError::AmountOverflow(_) => {
                "Invalid amount."
            }
            TokendeckError::ActionInFlight { .. } => {
                "That action is already running. Please wait."
            }
            TokendeckError::NotConnected(_) => "Connect a wallet first.",
            TokendeckError::UnknownToken(_) => "Unknown token.",
            TokendeckError::TransferFailed(_)
            | TokendeckError::UserRejected { .. }
            | TokendeckError::WalletRequest { .. } => "Transfer failed.",
            TokendeckError::Explorer(_) => "Failed to load transactions.",
            TokendeckError::ContractCall { .. } | TokendeckError::RpcConnection { .. } => {
                "Could not fetch balances. Check your Polygon connection."
            }
            TokendeckError::Config(_) => "Configuration problem. Check your settings.",
        }
    }

    /// True when the error was rejected locally, before any network call.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Builds the wallet-request error, collapsing user rejections into
    /// [`TokendeckError::UserRejected`].
    pub fn from_wallet_code(method: &str, code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            TokendeckError::UserRejected {
                method: method.to_string(),
            }
        } else {
            TokendeckError::WalletRequest {
                method: method.to_string(),
                code,
                message: message.into(),
            }
        }
    }
}
