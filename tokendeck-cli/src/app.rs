//! Dashboard application state and the connect/refresh/transfer flows.

use serde_json::Value;
use tokendeck_core::{
    account_from_response, ensure_chain, refresh_balances, resolve_provider, submit_transfer,
    watch_token, Action, Address, BalanceReport, ChainProfile, ProviderConfig, Session,
    TokenRegistry, TransferRequest, WalletClient,
};
use tokendeck_error::{Result, TokendeckError};
use tokendeck_explorer::{Direction, ExplorerClient, HistoryEntry};

use crate::config::DashboardConfig;

/// Everything one dashboard run holds: the session state machine, the
/// resolved provider, the token registry and the explorer client. No global
/// state; the menu loop owns exactly one of these.
pub struct DashboardApp {
    config: DashboardConfig,
    profile: ChainProfile,
    session: Session,
    client: Option<WalletClient>,
    registry: TokenRegistry,
    explorer: ExplorerClient,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        let profile = ChainProfile::polygon();
        let explorer = ExplorerClient::new(
            &config.explorer.api_url,
            &config.explorer.api_key,
            &profile.explorer_url,
        );
        Self {
            config,
            profile,
            session: Session::new(),
            client: None,
            registry: TokenRegistry::with_defaults(),
            explorer,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    fn client(&self) -> Result<&WalletClient> {
        self.client
            .as_ref()
            .ok_or_else(|| TokendeckError::NotConnected("no provider resolved".to_string()))
    }

    /// Runs the connect sequence: resolve the provider, guarantee the Polygon
    /// chain, request the wallet account, bind the token contracts, then
    /// refresh the dashboard. Any failing step drops the session back to
    /// disconnected.
    pub async fn connect(&mut self) -> Result<()> {
        self.session.begin_connect()?;
        match self.connect_inner().await {
            Ok(account) => {
                self.session.connected(account);
                println!("\n✅ Connected: {account}");
                println!("   {}", self.explorer.address_link(account));
                self.refresh().await
            }
            Err(e) => {
                self.session.connect_failed();
                Err(e)
            }
        }
    }

    async fn connect_inner(&mut self) -> Result<Address> {
        let client = resolve_provider(&ProviderConfig {
            rpc_url: self.config.rpc_url.clone(),
            private_key: self.config.private_key.clone(),
        })?;
        let backend = client.backend()?;
        ensure_chain(backend.as_ref(), &self.profile).await?;
        let response = backend.request("eth_requestAccounts", Value::Null).await?;
        let account = account_from_response(&response)?;
        self.registry.bind_contracts(&client)?;
        self.client = Some(client);
        Ok(account)
    }

    /// Refreshes balances and history for the connected account. A failing
    /// token read shows as `--` without stopping the rest; a failing history
    /// fetch shows one notice.
    pub async fn refresh(&mut self) -> Result<()> {
        self.session.begin_action(Action::Refresh)?;
        let result = self.refresh_inner().await;
        self.session.finish_action();
        result
    }

    async fn refresh_inner(&self) -> Result<()> {
        let account = self.session.account()?;
        let report = refresh_balances(&self.registry, &self.registry.tokens(), account).await;
        print!("{}", render_balances(&report));
        if report.any_failed() {
            println!("   ⚠️  Could not fetch balances. Check your Polygon connection.");
        }

        match self.explorer.fetch_history(account).await {
            Ok(entries) => print!("{}", render_history(&entries)),
            Err(e) => {
                log::warn!("history refresh failed: {e}");
                println!("\n📜 Recent Transactions");
                println!("   {}", e.user_message());
            }
        }
        Ok(())
    }

    /// Submits a transfer and, once the node accepts it, refreshes the
    /// dashboard so the new balance and history entry show up.
    pub async fn transfer(&mut self, request: TransferRequest) -> Result<()> {
        // Resolve the client before taking the guard so no early return can
        // strand the session in Transferring.
        let client = self.client()?.clone();
        self.session.begin_action(Action::Transfer)?;
        let result = submit_transfer(&client, &self.registry, &self.profile, &request).await;
        self.session.finish_action();

        let outcome = result?;
        println!("\n✅ Transfer submitted: {}", outcome.tx_hash);
        println!(
            "   {}/tx/{}",
            self.profile.explorer_url.trim_end_matches('/'),
            outcome.tx_hash
        );
        self.refresh().await
    }

    /// Asks the wallet to track each registered token.
    pub async fn watch_tokens(&self) -> Result<()> {
        self.session.account()?;
        let backend = self.client()?.backend()?;
        for token in self.registry.tokens() {
            watch_token(backend.as_ref(), token).await?;
            println!("👁  Watching {}", token.symbol);
        }
        Ok(())
    }

    pub fn token_symbols(&self) -> Vec<String> {
        self.registry
            .tokens()
            .iter()
            .map(|t| t.symbol.clone())
            .collect()
    }
}

fn render_balances(report: &BalanceReport) -> String {
    let mut panel = String::from("\n💰 Balances\n");
    for entry in &report.entries {
        match &entry.balance {
            Ok(amount) => {
                panel.push_str(&format!("   {:<4} {}\n", entry.symbol, amount.display()))
            }
            Err(_) => panel.push_str(&format!("   {:<4} --\n", entry.symbol)),
        }
    }
    panel
}

fn render_history(entries: &[HistoryEntry]) -> String {
    let mut panel = String::from("\n📜 Recent Transactions\n");
    if entries.is_empty() {
        panel.push_str("   No transactions yet.\n");
        return panel;
    }
    for entry in entries {
        panel.push_str(&format!(
            "   {:<8} {} {} {} {}\n",
            entry.direction.label(),
            entry.amount,
            entry.token_symbol,
            match entry.direction {
                Direction::Outgoing => "to",
                Direction::Incoming => "from",
            },
            entry.counterparty,
        ));
        panel.push_str(&format!("            {}\n", entry.link));
    }
    panel
}
