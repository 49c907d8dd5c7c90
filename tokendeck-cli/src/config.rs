//! Configuration

use serde::{Deserialize, Serialize};
use tokendeck_core::ChainProfile;

const CONFIG_FILE: &str = "tokendeck.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub rpc_url: String,
    /// Signing key; absent means a read-only session. Accepted from the
    /// config file or the environment, never written back to disk.
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
    pub explorer: ExplorerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub api_url: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

fn default_api_key() -> String {
    "YourApiKeyToken".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let profile = ChainProfile::polygon();
        Self {
            rpc_url: profile.primary_rpc().to_string(),
            private_key: None,
            explorer: ExplorerConfig {
                api_url: "https://api.polygonscan.com/api".to_string(),
                api_key: default_api_key(),
            },
        }
    }
}

impl DashboardConfig {
    /// Loads `tokendeck.json` from the working directory, falling back to
    /// defaults, then applies environment overrides. `TOKENDECK_PRIVATE_KEY`
    /// wins over the legacy `WEB3_PRIVATE_KEY` name.
    pub fn load() -> Self {
        let mut config: Self = std::fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        config.apply_env();
        config
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(CONFIG_FILE, json)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TOKENDECK_RPC_URL") {
            self.rpc_url = url;
        }
        if let Ok(key) = std::env::var("TOKENDECK_PRIVATE_KEY") {
            self.private_key = Some(key);
        } else if let Ok(key) = std::env::var("WEB3_PRIVATE_KEY") {
            self.private_key = Some(key);
        }
        if let Ok(key) = std::env::var("TOKENDECK_EXPLORER_API_KEY") {
            self.explorer.api_key = key;
        }
    }
}
