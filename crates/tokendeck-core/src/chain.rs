use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Chain ID of Polygon mainnet, `0x89` on the wire.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Target chain profile: everything the dashboard needs to talk about a
/// network, including the metadata an add-chain wallet request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainProfile {
    pub chain_id: u64,
    pub name: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub decimals: u8,
    pub block_time_ms: u64,
    pub rpc_endpoints: Vec<String>,
    pub explorer_url: String,
}

impl ChainProfile {
    /// Polygon mainnet configuration, the dashboard's target chain.
    pub fn polygon() -> Self {
        ChainProfile {
            chain_id: POLYGON_CHAIN_ID,
            name: "Polygon Mainnet".to_string(),
            currency_name: "POL".to_string(),
            currency_symbol: "POL".to_string(),
            decimals: 18,
            block_time_ms: 2000, // ~2 second blocks
            rpc_endpoints: vec![
                "https://polygon-rpc.com".to_string(),
                "https://rpc.ankr.com/polygon".to_string(),
                "https://polygon.publicnode.com".to_string(),
            ],
            explorer_url: "https://polygonscan.com".to_string(),
        }
    }

    /// Chain id in the hex form wallet requests use (`0x89` for Polygon).
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// The RPC endpoint used when the caller does not pick one.
    pub fn primary_rpc(&self) -> &str {
        self.rpc_endpoints
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Parameter object for a `wallet_addEthereumChain` request.
    pub fn add_chain_params(&self) -> Value {
        json!({
            "chainId": self.chain_id_hex(),
            "chainName": self.name,
            "rpcUrls": self.rpc_endpoints,
            "nativeCurrency": {
                "name": self.currency_name,
                "symbol": self.currency_symbol,
                "decimals": self.decimals,
            },
            "blockExplorerUrls": [self.explorer_url],
        })
    }
}
