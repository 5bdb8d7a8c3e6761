//! Fixed-shape success records returned by the six tools.
//!
//! Numeric fields default to 0 and strings to empty when the provider
//! response omits them; absence never becomes an error.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Spot price and 24h figures for one coin. The timestamp is generated
/// locally at call time, not provider-sourced.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub timestamp: DateTime<Local>,
}

/// Flattened view of a coin's `market_data` detail section.
#[derive(Debug, Clone, Serialize)]
pub struct MarketDetail {
    pub symbol: String,
    pub name: String,
    pub market_cap_rank: u64,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub price_change_24h: f64,
    pub price_change_percentage_24h: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: f64,
    pub ath: f64,
    pub ath_date: String,
    pub atl: f64,
    pub atl_date: String,
}

/// A single historical price point.
#[derive(Debug, Clone, Serialize)]
pub struct PricePoint {
    pub date: DateTime<Local>,
    pub price: f64,
}

/// Historical price series, in provider order. `days` is the clamped value
/// actually queried, so callers can see when clamping occurred.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    pub name: String,
    pub days: u32,
    pub prices: Vec<PricePoint>,
}

/// One coin-list entry matching a search query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
}

/// One coin trending in search over the last 24 hours. `price_btc` is
/// expressed in bitcoin, not the usual reference currency.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: u64,
    pub price_btc: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingCoins {
    pub trending_coins: Vec<TrendingCoin>,
}

/// Global aggregate market snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalSnapshot {
    pub active_cryptocurrencies: u64,
    pub markets: u64,
    pub total_market_cap_usd: f64,
    pub total_volume_usd: f64,
    pub market_cap_percentage: HashMap<String, f64>,
    pub updated_at: DateTime<Local>,
}
