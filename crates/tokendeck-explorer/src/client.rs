//! HTTP client for the block-explorer account API.

use serde::Deserialize;
use serde_json::Value;
use tokendeck_core::Address;
use tokendeck_error::{Result, TokendeckError};

use crate::history::{build_entries, HistoryEntry, TokenTxRecord};

/// Client for a Polygonscan-style explorer API.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    explorer_url: String,
}

/// Raw API envelope. `result` is an array of records on success but can be
/// a bare string on API-side errors, so it is decoded in a second step.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

impl ExplorerClient {
    /// New client against `api_url` (e.g. `https://api.polygonscan.com/api`),
    /// authenticating with `api_key` and linking records to `explorer_url`.
    pub fn new(api_url: &str, api_key: &str, explorer_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            explorer_url: explorer_url.to_string(),
        }
    }

    /// Fetches the account's token-transfer records across the full block
    /// range, newest first, exactly as the API returns them.
    pub async fn token_transfers(&self, account: Address) -> Result<Vec<TokenTxRecord>> {
        let address = format!("{account:?}");
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "tokentx"),
                ("address", address.as_str()),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "desc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokendeckError::Explorer(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokendeckError::Explorer(format!("HTTP {status}")));
        }
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| TokendeckError::Explorer(format!("malformed response: {e}")))?;

        if body.status == "1" {
            return serde_json::from_value(body.result)
                .map_err(|e| TokendeckError::Explorer(format!("malformed result: {e}")));
        }
        // status "0" with an empty result array is the API's way of saying
        // "no transactions"; anything else is a real failure.
        match body.result.as_array() {
            Some(list) if list.is_empty() => Ok(Vec::new()),
            _ => {
                log::warn!(
                    "explorer API rejected tokentx request: {} ({})",
                    body.message,
                    body.result
                );
                Err(TokendeckError::Explorer(format!(
                    "API error: {} ({})",
                    body.message, body.result
                )))
            }
        }
    }

    /// Fetches and renders the account's recent history: at most
    /// [`crate::HISTORY_LIMIT`] entries in API order, with direction
    /// classified against `account`. An empty vec means "no transactions";
    /// an error means the refresh failed and the caller shows one notice.
    pub async fn fetch_history(&self, account: Address) -> Result<Vec<HistoryEntry>> {
        let records = self.token_transfers(account).await?;
        build_entries(&records, account, &self.explorer_url)
    }

    /// Public explorer page for an account.
    pub fn address_link(&self, account: Address) -> String {
        format!(
            "{}/address/{account:?}",
            self.explorer_url.trim_end_matches('/')
        )
    }
}
