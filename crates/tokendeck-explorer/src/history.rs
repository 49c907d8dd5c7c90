//! History records and their presentation form.

use serde::Deserialize;
use tokendeck_core::{Address, TokenAmount, U256};
use tokendeck_error::{Result, TokendeckError};

/// At most this many records are rendered per refresh.
pub const HISTORY_LIMIT: usize = 5;

/// Token-transfer decimal scale assumed for display.
const TOKEN_DECIMALS: u8 = 18;

/// One token-transfer record as the explorer API returns it. Externally
/// sourced and read-only; unrecognized fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTxRecord {
    /// Transaction hash
    pub hash: String,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Transferred value in base units, as a decimal string
    pub value: String,
    /// Symbol of the transferred token
    #[serde(rename = "tokenSymbol")]
    pub token_symbol: String,
}

/// Whether a record moves value away from or toward the connected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `from` equals the connected account (case-insensitively)
    Outgoing,
    /// everything else
    Incoming,
}

impl Direction {
    /// Classifies a record against the connected account.
    pub fn classify(record_from: &str, account: Address) -> Self {
        let account_hex = format!("{account:?}");
        if record_from.eq_ignore_ascii_case(&account_hex) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    /// Short label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Outgoing => "Sent",
            Direction::Incoming => "Received",
        }
    }
}

/// A rendered history line: direction, amount, token, counterparty and the
/// public explorer link.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Transfer direction relative to the connected account
    pub direction: Direction,
    /// Display amount (base units scaled by 18 decimals)
    pub amount: String,
    /// Token symbol from the record
    pub token_symbol: String,
    /// The other party of the transfer
    pub counterparty: String,
    /// Transaction hash
    pub hash: String,
    /// Public explorer link for the transaction
    pub link: String,
}

/// Builds display entries from API records, preserving the API's order and
/// keeping at most [`HISTORY_LIMIT`] of them. A record with a malformed
/// value field makes the whole batch count as a failed load.
pub fn build_entries(
    records: &[TokenTxRecord],
    account: Address,
    explorer_url: &str,
) -> Result<Vec<HistoryEntry>> {
    records
        .iter()
        .take(HISTORY_LIMIT)
        .map(|record| {
            let base = U256::from_str_radix(record.value.trim(), 10).map_err(|e| {
                TokendeckError::Explorer(format!(
                    "malformed value '{}' in record {}: {e}",
                    record.value, record.hash
                ))
            })?;
            let direction = Direction::classify(&record.from, account);
            let counterparty = match direction {
                Direction::Outgoing => record.to.clone(),
                Direction::Incoming => record.from.clone(),
            };
            Ok(HistoryEntry {
                direction,
                amount: TokenAmount::from_base(base, TOKEN_DECIMALS).display(),
                token_symbol: record.token_symbol.clone(),
                counterparty,
                hash: record.hash.clone(),
                link: format!("{}/tx/{}", explorer_url.trim_end_matches('/'), record.hash),
            })
        })
        .collect()
}
