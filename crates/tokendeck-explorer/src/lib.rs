//! # Tokendeck Explorer
//!
//! Recent-transaction history for the dashboard, fetched from a
//! Polygonscan-style block-explorer HTTP API (`module=account`,
//! `action=tokentx`). The explorer owns the data; this crate consumes it,
//! classifies transfer direction against the connected account, bounds the
//! list and builds public explorer links.
//!
//! A single failed fetch is terminal for that refresh cycle: there is no
//! retry here, the caller surfaces one "failed to load" notice and the user
//! retries manually.

#![forbid(unsafe_code)]

mod client;
mod history;

pub use client::ExplorerClient;
pub use history::{Direction, HistoryEntry, TokenTxRecord, HISTORY_LIMIT};
