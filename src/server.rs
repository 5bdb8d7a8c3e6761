//! MCP surface: six tools routed onto the query adapter.
//!
//! Error records are tool *data*, not protocol errors -- every call returns
//! a successful `CallToolResult` whose JSON content is either the success
//! record or `{"error": ...}`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;

use crate::provider::MarketDataProvider;
use crate::tools::{ToolReply, queries};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct SymbolArgs {
    /// Cryptocurrency ticker symbol (e.g. btc, eth, doge)
    pub symbol: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct HistoryArgs {
    /// Cryptocurrency ticker symbol (e.g. btc, eth, doge)
    pub symbol: String,
    /// Number of days of data to fetch (1-365)
    #[serde(default = "default_history_days")]
    pub days: i64,
}

fn default_history_days() -> i64 {
    30
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct SearchArgs {
    /// Search term
    pub query: String,
}

/// MCP server exposing the cryptocurrency market data tools.
#[derive(Clone)]
pub struct CryptoTrader {
    provider: Arc<dyn MarketDataProvider>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CryptoTrader {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            tool_router: Self::tool_router(),
        }
    }

    fn reply<T: serde::Serialize>(reply: &ToolReply<T>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::json(reply)?]))
    }

    #[tool(description = "Get current cryptocurrency price and 24h change")]
    async fn get_crypto_price(
        &self,
        Parameters(args): Parameters<SymbolArgs>,
    ) -> Result<CallToolResult, McpError> {
        Self::reply(&queries::get_crypto_price(self.provider.as_ref(), &args.symbol).await)
    }

    #[tool(description = "Get detailed market data for a cryptocurrency")]
    async fn get_crypto_market_data(
        &self,
        Parameters(args): Parameters<SymbolArgs>,
    ) -> Result<CallToolResult, McpError> {
        Self::reply(&queries::get_crypto_market_data(self.provider.as_ref(), &args.symbol).await)
    }

    #[tool(description = "Get historical price data for a cryptocurrency")]
    async fn get_crypto_historical_data(
        &self,
        Parameters(args): Parameters<HistoryArgs>,
    ) -> Result<CallToolResult, McpError> {
        Self::reply(
            &queries::get_crypto_historical_data(self.provider.as_ref(), &args.symbol, args.days)
                .await,
        )
    }

    #[tool(description = "Search for cryptocurrencies by name or symbol")]
    async fn search_crypto(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        Self::reply(&queries::search_crypto(self.provider.as_ref(), &args.query).await)
    }

    #[tool(description = "Get trending cryptocurrencies in the last 24 hours")]
    async fn get_trending_crypto(&self) -> Result<CallToolResult, McpError> {
        Self::reply(&queries::get_trending_crypto(self.provider.as_ref()).await)
    }

    #[tool(description = "Get global cryptocurrency market data")]
    async fn get_global_crypto_data(&self) -> Result<CallToolResult, McpError> {
        Self::reply(&queries::get_global_crypto_data(self.provider.as_ref()).await)
    }
}

#[tool_handler]
impl ServerHandler for CryptoTrader {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Cryptocurrency market data backed by CoinGecko: spot prices, \
                 detailed market stats, historical series, search, trending \
                 coins, and global aggregates. Tools return an {\"error\": ...} \
                 record instead of their usual shape when a lookup fails."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
