//! Tokendeck - Polygon token dashboard CLI
//!
//! Terminal rendition of the dashboard flow: connect a wallet, guarantee the
//! Polygon chain, show COT/PIX/TIN balances and recent transfers, and send
//! tokens. A run without a configured private key is read-only.

mod app;
mod config;

use app::DashboardApp;
use config::DashboardConfig;
use std::io::{self, Write};
use tokendeck_core::TransferRequest;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    print_banner();

    let config = DashboardConfig::load();
    let _ = config.save();
    if config.private_key.is_none() {
        println!("⚠️  No wallet key configured (TOKENDECK_PRIVATE_KEY).");
        println!("   Running read-only: connect and transfer are unavailable.\n");
    }
    let mut app = DashboardApp::new(config);

    loop {
        print_menu(&app);

        print!("\nYour choice: ");
        io::stdout().flush()?;
        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let result = match choice.trim() {
            "1" => app.connect().await,
            "2" => app.refresh().await,
            "3" => {
                let request = prompt_transfer(&app)?;
                app.transfer(request).await
            }
            "4" => app.watch_tokens().await,
            "0" | "q" => {
                println!("\nThank you for using Tokendeck!");
                return Ok(());
            }
            _ => continue,
        };

        if let Err(e) = result {
            log::warn!("{e}");
            eprintln!("\n❌ {}", e.user_message());
        }
    }
}

fn print_banner() {
    println!("\n  ████████╗ ██████╗ ██╗  ██╗███████╗███╗   ██╗██████╗ ███████╗ ██████╗██╗  ██╗");
    println!("  ╚══██╔══╝██╔═══██╗██║ ██╔╝██╔════╝████╗  ██║██╔══██╗██╔════╝██╔════╝██║ ██╔╝");
    println!("     ██║   ██║   ██║█████╔╝ █████╗  ██╔██╗ ██║██║  ██║█████╗  ██║     █████╔╝ ");
    println!("     ██║   ██║   ██║██╔═██╗ ██╔══╝  ██║╚██╗██║██║  ██║██╔══╝  ██║     ██╔═██╗ ");
    println!("     ██║   ╚██████╔╝██║  ██╗███████╗██║ ╚████║██████╔╝███████╗╚██████╗██║  ██╗");
    println!("     ╚═╝    ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═══╝╚═════╝ ╚══════╝ ╚═════╝╚═╝  ╚═╝");
    println!("\n              v{VERSION} - Polygon Token Dashboard\n");
}

fn print_menu(app: &DashboardApp) {
    println!("\n══════════════════════════════════");
    if app.is_connected() {
        println!("  [1] 🔄 Reconnect wallet");
        println!("  [2] 💰 Refresh balances & history");
        println!("  [3] 📤 Send tokens");
        println!("  [4] 👁  Watch tokens in wallet");
    } else {
        println!("  [1] 🔌 Connect wallet");
    }
    println!("  [0] 🚪 Exit");
}

fn prompt_transfer(app: &DashboardApp) -> Result<TransferRequest, io::Error> {
    let symbols = app.token_symbols();
    println!("\nToken ({}):", symbols.join("/"));
    let token_symbol = prompt("  symbol > ")?;
    let recipient = prompt("  recipient > ")?;
    let amount = prompt("  amount > ")?;
    Ok(TransferRequest {
        token_symbol: token_symbol.to_uppercase(),
        recipient,
        amount,
    })
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
