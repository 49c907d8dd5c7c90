//! Registry of the dashboard's tokens and their bound contract handles.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokendeck_error::{Result, TokendeckError};

use crate::erc20::Erc20Handle;
use crate::provider::WalletClient;

/// Token metadata. Immutable once constructed; the contract handle is bound
/// separately, once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token symbol (e.g., "COT")
    pub symbol: String,
    /// Token name
    pub name: String,
    /// Decimal places
    pub decimals: u8,
    /// Contract address
    pub address: String,
    /// Display logo
    pub logo_url: Option<String>,
}

impl TokenInfo {
    /// Create a new token info
    pub fn new(symbol: &str, name: &str, decimals: u8, address: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            address: address.to_string(),
            logo_url: None,
        }
    }

    /// Attach a display logo
    pub fn with_logo(mut self, logo_url: &str) -> Self {
        self.logo_url = Some(logo_url.to_string());
        self
    }

    /// Get contract address as Address type
    pub fn contract_address(&self) -> Result<Address> {
        Address::from_str(&self.address).map_err(|e| {
            TokendeckError::Config(format!("bad contract address for {}: {e}", self.symbol))
        })
    }
}

struct Entry {
    info: TokenInfo,
    handle: Option<Erc20Handle>,
}

/// The dashboard's token table, keyed by symbol and kept in display order.
pub struct TokenRegistry {
    entries: Vec<Entry>,
}

impl TokenRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the dashboard's three Polygon tokens pre-loaded.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add_token(
            TokenInfo::new(
                "COT",
                "COT Token",
                18,
                "0x0d4013b4e2e2f89171bbe956da995757fb5a6678",
            )
            .with_logo("assets/cot.png"),
        );
        registry.add_token(
            TokenInfo::new(
                "PIX",
                "PIX Token",
                18,
                "0x1d7e521627cc4955ac8df6fe2fcb45891d0f30b7",
            )
            .with_logo("assets/pix.png"),
        );
        registry.add_token(
            TokenInfo::new(
                "TIN",
                "TIN Token",
                18,
                "0xe7d8c8818106a565980315675d7adcb1d8ab1318",
            )
            .with_logo("assets/tin.png"),
        );
        registry
    }

    /// Add a token. A token with the same symbol is replaced and loses any
    /// bound handle.
    pub fn add_token(&mut self, token: TokenInfo) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.info.symbol == token.symbol)
        {
            entry.info = token;
            entry.handle = None;
        } else {
            self.entries.push(Entry {
                info: token,
                handle: None,
            });
        }
    }

    /// Tokens in display order.
    pub fn tokens(&self) -> Vec<&TokenInfo> {
        self.entries.iter().map(|e| &e.info).collect()
    }

    /// Get a token by symbol.
    pub fn get(&self, symbol: &str) -> Option<&TokenInfo> {
        self.entries
            .iter()
            .find(|e| e.info.symbol == symbol)
            .map(|e| &e.info)
    }

    /// Binds a contract handle for every registered token against the
    /// resolved provider. Must run after the provider and chain are
    /// confirmed and before any balance or transfer call. Rebinding is
    /// idempotent: prior handles are overwritten.
    pub fn bind_contracts(&mut self, client: &WalletClient) -> Result<()> {
        for entry in &mut self.entries {
            entry.handle = Some(Erc20Handle::new(&entry.info, client.rpc_url())?);
        }
        Ok(())
    }

    /// The bound contract handle for a symbol.
    ///
    /// Errors with [`TokendeckError::UnknownToken`] for an unregistered
    /// symbol and [`TokendeckError::NotConnected`] when `bind_contracts` has
    /// not run yet.
    pub fn handle(&self, symbol: &str) -> Result<&Erc20Handle> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.info.symbol == symbol)
            .ok_or_else(|| TokendeckError::UnknownToken(symbol.to_string()))?;
        entry.handle.as_ref().ok_or_else(|| {
            TokendeckError::NotConnected(format!("contract for {symbol} not bound"))
        })
    }

    /// True once contracts are bound.
    pub fn is_bound(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.handle.is_some())
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{resolve_provider, ProviderConfig};

    fn read_only_client() -> WalletClient {
        resolve_provider(&ProviderConfig {
            rpc_url: "https://polygon-rpc.com".to_string(),
            private_key: None,
        })
        .unwrap()
    }

    #[test]
    fn test_defaults_in_display_order() {
        let registry = TokenRegistry::with_defaults();
        let symbols: Vec<&str> = registry
            .tokens()
            .iter()
            .map(|t| t.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["COT", "PIX", "TIN"]);
    }

    #[test]
    fn test_default_addresses_parse() {
        let registry = TokenRegistry::with_defaults();
        for token in registry.tokens() {
            assert!(token.contract_address().is_ok(), "{}", token.symbol);
            assert_eq!(token.decimals, 18);
            assert!(token.logo_url.is_some());
        }
    }

    #[test]
    fn test_get_by_symbol() {
        let registry = TokenRegistry::with_defaults();
        assert!(registry.get("PIX").is_some());
        assert!(registry.get("DOGE").is_none());
    }

    #[test]
    fn test_handle_before_binding_is_not_connected() {
        let registry = TokenRegistry::with_defaults();
        assert!(matches!(
            registry.handle("COT"),
            Err(TokendeckError::NotConnected(_))
        ));
        assert!(!registry.is_bound());
    }

    #[test]
    fn test_handle_unknown_token() {
        let registry = TokenRegistry::with_defaults();
        assert!(matches!(
            registry.handle("DOGE"),
            Err(TokendeckError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_bind_contracts_idempotent() {
        let mut registry = TokenRegistry::with_defaults();
        let client = read_only_client();
        registry.bind_contracts(&client).unwrap();
        assert!(registry.is_bound());
        // rebinding overwrites rather than failing
        registry.bind_contracts(&client).unwrap();
        assert!(registry.is_bound());
        assert!(registry.handle("TIN").is_ok());
    }

    #[test]
    fn test_bind_rejects_malformed_address() {
        let mut registry = TokenRegistry::new();
        registry.add_token(TokenInfo::new("BAD", "Bad Token", 18, "0x123"));
        let err = registry.bind_contracts(&read_only_client()).unwrap_err();
        assert!(matches!(err, TokendeckError::Config(_)));
    }

    #[test]
    fn test_replacing_token_drops_handle() {
        let mut registry = TokenRegistry::with_defaults();
        registry.bind_contracts(&read_only_client()).unwrap();
        registry.add_token(TokenInfo::new(
            "COT",
            "COT Token v2",
            18,
            "0x0d4013b4e2e2f89171bbe956da995757fb5a6678",
        ));
        assert!(registry.handle("COT").is_err());
        assert_eq!(registry.tokens().len(), 3);
    }
}
