use std::sync::Arc;

use clap::Parser;
use crypto_trader::error::{Error, Result};
use crypto_trader::provider::MarketDataProvider;
use crypto_trader::provider::coingecko::CoinGecko;
use crypto_trader::server::CryptoTrader;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "crypto-trader",
    version,
    about = "MCP server exposing cryptocurrency market data tools"
)]
struct Cli {
    /// Override the CoinGecko API base URL (proxy or mock)
    #[arg(long, env = "COINGECKO_BASE_URL")]
    base_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the MCP transport; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before CLI parsing so env-backed args (e.g. COINGECKO_BASE_URL) pick it up.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!(error = %e, "fatal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let provider: Arc<dyn MarketDataProvider> = Arc::new(match cli.base_url {
        Some(url) => CoinGecko::with_base_url(url),
        None => CoinGecko::new(),
    });

    info!(provider = provider.name(), "serving MCP tools on stdio");

    let service = CryptoTrader::new(provider)
        .serve(stdio())
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    Ok(())
}
