pub mod coingecko;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// One entry of the provider's full coin listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinListing {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// `/simple/price` response shape.
/// Example: `{ "bitcoin": { "usd": 50000, "usd_24h_change": 2.5, "usd_market_cap": 9.5e11 } }`
pub type SimplePrice = HashMap<String, HashMap<String, f64>>;

/// `/coins/{id}` detail object, reduced to the fields the tools flatten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market_data: MarketData,
}

/// Nested `market_data` section of a coin detail.
///
/// Every field deserializes independently and the section as a whole may be
/// missing; a detail object with no supply figures still carries full price
/// data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketData {
    pub market_cap_rank: Option<u64>,
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub high_24h: HashMap<String, f64>,
    #[serde(default)]
    pub low_24h: HashMap<String, f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: HashMap<String, f64>,
    #[serde(default)]
    pub ath_date: HashMap<String, String>,
    #[serde(default)]
    pub atl: HashMap<String, f64>,
    #[serde(default)]
    pub atl_date: HashMap<String, String>,
}

/// `/coins/{id}/market_chart` series. Each pair is `[epoch_ms, value]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<(i64, f64)>,
}

/// `/search/trending` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingEntry>,
}

/// One trending entry. The payload sits under `item`; an absent payload
/// yields a defaulted item rather than a skipped entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingEntry {
    #[serde(default)]
    pub item: TrendingItem,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub market_cap_rank: Option<u64>,
    pub price_btc: Option<f64>,
}

/// Envelope around `/global` -- the payload lives under `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalResponse {
    #[serde(default)]
    pub data: GlobalOverview,
}

/// Global aggregate market stats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalOverview {
    #[serde(default)]
    pub active_cryptocurrencies: u64,
    #[serde(default)]
    pub markets: u64,
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    pub updated_at: Option<i64>,
}

/// Trait implemented by the market data provider.
///
/// The tool layer and the tests depend on this seam, not on the concrete
/// HTTP client.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Complete listing of known coins, in provider order.
    async fn get_coins_list(&self) -> Result<Vec<CoinListing>>;

    /// Spot price plus 24h change, 24h volume, and market cap for one coin id.
    async fn get_simple_price(&self, id: &str, vs_currency: &str) -> Result<SimplePrice>;

    /// Full detail object for one coin id.
    async fn get_coin_detail(&self, id: &str) -> Result<CoinDetail>;

    /// Historical market chart for one coin id over `days` days.
    async fn get_market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart>;

    /// Coins trending in search over the last 24 hours.
    async fn get_trending(&self) -> Result<TrendingResponse>;

    /// Global aggregate market stats.
    async fn get_global(&self) -> Result<GlobalOverview>;
}
