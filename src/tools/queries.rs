//! The six query operations: resolve the symbol where applicable, issue one
//! provider call, flatten the response into a fixed-shape record.
//!
//! Every operation catches all failures at its boundary, logs them with the
//! failing input, and returns the uniform error record instead. Nothing is
//! retried and nothing propagates to the host as a fault.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::{error, warn};

use super::ToolReply;
use super::records::{
    GlobalSnapshot, HistoricalSeries, MarketDetail, PricePoint, PriceSnapshot, SearchHit,
    SearchResults, TrendingCoin, TrendingCoins,
};
use crate::error::{Error, Result};
use crate::provider::MarketDataProvider;
use crate::resolver;

/// Reference currency for all monetary figures except trending prices.
const VS_CURRENCY: &str = "usd";
const MIN_HISTORY_DAYS: i64 = 1;
const MAX_HISTORY_DAYS: i64 = 365;
const MAX_SEARCH_RESULTS: usize = 25;

/// Current price, 24h change, 24h volume, and market cap for one coin.
pub async fn get_crypto_price(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> ToolReply<PriceSnapshot> {
    match price_snapshot(provider, symbol).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, format!("Failed to fetch price for {}", symbol)),
    }
}

/// Detailed market data for one coin, flattened from the provider's nested
/// `market_data` section.
pub async fn get_crypto_market_data(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> ToolReply<MarketDetail> {
    match market_detail(provider, symbol).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, format!("Failed to fetch market data for {}", symbol)),
    }
}

/// Historical price series for one coin over `days` days (clamped 1-365).
pub async fn get_crypto_historical_data(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    days: i64,
) -> ToolReply<HistoricalSeries> {
    match historical_series(provider, symbol, days).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, format!("Failed to fetch historical data for {}", symbol)),
    }
}

/// Case-insensitive substring search over coin ids, symbols, and names.
pub async fn search_crypto(
    provider: &dyn MarketDataProvider,
    query: &str,
) -> ToolReply<SearchResults> {
    match search_results(provider, query).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, "Search failed".to_string()),
    }
}

/// Coins trending in search over the last 24 hours.
pub async fn get_trending_crypto(provider: &dyn MarketDataProvider) -> ToolReply<TrendingCoins> {
    match trending_coins(provider).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, "Failed to fetch trending cryptocurrencies".to_string()),
    }
}

/// Global aggregate market snapshot.
pub async fn get_global_crypto_data(
    provider: &dyn MarketDataProvider,
) -> ToolReply<GlobalSnapshot> {
    match global_snapshot(provider).await {
        Ok(record) => ToolReply::Success(record),
        Err(e) => failure(e, "Failed to fetch global cryptocurrency data".to_string()),
    }
}

/// Shared failure boundary. Not-found and no-data errors already carry their
/// own message including the offending symbol; everything else is wrapped in
/// the operation's label.
fn failure<T>(err: Error, label: String) -> ToolReply<T> {
    match &err {
        Error::SymbolNotFound(_) | Error::DataUnavailable(_) => {
            warn!(error = %err, "lookup failed");
            ToolReply::failure(err.to_string())
        }
        _ => {
            error!(error = %err, "{}", label);
            ToolReply::failure(format!("{}: {}", label, err))
        }
    }
}

async fn price_snapshot(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<PriceSnapshot> {
    let coin = resolver::resolve(provider, symbol).await?;
    let data = provider.get_simple_price(&coin.id, VS_CURRENCY).await?;

    // An empty map or a map without our id both mean the price is missing,
    // which is distinct from the symbol being unknown.
    let Some(quote) = data.get(&coin.id) else {
        return Err(Error::DataUnavailable(symbol.to_string()));
    };

    Ok(PriceSnapshot {
        symbol: resolver::normalize_symbol(symbol).to_uppercase(),
        name: coin.id,
        price: quote.get("usd").copied().unwrap_or(0.0),
        change_24h: quote.get("usd_24h_change").copied().unwrap_or(0.0),
        volume_24h: quote.get("usd_24h_vol").copied().unwrap_or(0.0),
        market_cap: quote.get("usd_market_cap").copied().unwrap_or(0.0),
        timestamp: Local::now(),
    })
}

async fn market_detail(provider: &dyn MarketDataProvider, symbol: &str) -> Result<MarketDetail> {
    let coin = resolver::resolve(provider, symbol).await?;
    let detail = provider.get_coin_detail(&coin.id).await?;
    let md = detail.market_data;

    let usd = |map: &HashMap<String, f64>| map.get(VS_CURRENCY).copied().unwrap_or(0.0);
    let usd_date =
        |map: &HashMap<String, String>| map.get(VS_CURRENCY).cloned().unwrap_or_default();

    Ok(MarketDetail {
        symbol: resolver::normalize_symbol(symbol).to_uppercase(),
        name: detail.name,
        market_cap_rank: md.market_cap_rank.unwrap_or(0),
        current_price: usd(&md.current_price),
        market_cap: usd(&md.market_cap),
        total_volume: usd(&md.total_volume),
        high_24h: usd(&md.high_24h),
        low_24h: usd(&md.low_24h),
        price_change_24h: md.price_change_24h.unwrap_or(0.0),
        price_change_percentage_24h: md.price_change_percentage_24h.unwrap_or(0.0),
        circulating_supply: md.circulating_supply.unwrap_or(0.0),
        total_supply: md.total_supply.unwrap_or(0.0),
        max_supply: md.max_supply.unwrap_or(0.0),
        ath: usd(&md.ath),
        ath_date: usd_date(&md.ath_date),
        atl: usd(&md.atl),
        atl_date: usd_date(&md.atl_date),
    })
}

/// Constrain a requested day count into the supported inclusive range.
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(MIN_HISTORY_DAYS, MAX_HISTORY_DAYS) as u32
}

async fn historical_series(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    days: i64,
) -> Result<HistoricalSeries> {
    let coin = resolver::resolve(provider, symbol).await?;
    let days = clamp_days(days);
    let chart = provider.get_market_chart(&coin.id, VS_CURRENCY, days).await?;

    // Provider order is preserved as-is; no deduplication or interpolation.
    let prices = chart
        .prices
        .into_iter()
        .map(|(epoch_ms, price)| PricePoint {
            date: DateTime::from_timestamp_millis(epoch_ms)
                .unwrap_or(DateTime::UNIX_EPOCH)
                .with_timezone(&Local),
            price,
        })
        .collect();

    Ok(HistoricalSeries {
        symbol: resolver::normalize_symbol(symbol).to_uppercase(),
        name: coin.id,
        days,
        prices,
    })
}

async fn search_results(provider: &dyn MarketDataProvider, query: &str) -> Result<SearchResults> {
    let listings = provider.get_coins_list().await?;
    let needle = query.to_lowercase();

    let results = listings
        .into_iter()
        .filter(|coin| {
            coin.id.to_lowercase().contains(&needle)
                || coin.symbol.to_lowercase().contains(&needle)
                || coin.name.to_lowercase().contains(&needle)
        })
        .take(MAX_SEARCH_RESULTS)
        .map(|coin| SearchHit {
            id: coin.id,
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
        })
        .collect();

    Ok(SearchResults { results })
}

async fn trending_coins(provider: &dyn MarketDataProvider) -> Result<TrendingCoins> {
    let trending = provider.get_trending().await?;

    let trending_coins = trending
        .coins
        .into_iter()
        .map(|entry| {
            let item = entry.item;
            TrendingCoin {
                id: item.id,
                name: item.name,
                symbol: item.symbol.to_uppercase(),
                market_cap_rank: item.market_cap_rank.unwrap_or(0),
                price_btc: item.price_btc.unwrap_or(0.0),
            }
        })
        .collect();

    Ok(TrendingCoins { trending_coins })
}

async fn global_snapshot(provider: &dyn MarketDataProvider) -> Result<GlobalSnapshot> {
    let overview = provider.get_global().await?;

    let market_cap_percentage = overview
        .market_cap_percentage
        .into_iter()
        .map(|(label, share)| (label.to_uppercase(), share))
        .collect();

    let updated_at = overview
        .updated_at
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Local);

    Ok(GlobalSnapshot {
        active_cryptocurrencies: overview.active_cryptocurrencies,
        markets: overview.markets,
        total_market_cap_usd: overview
            .total_market_cap
            .get(VS_CURRENCY)
            .copied()
            .unwrap_or(0.0),
        total_volume_usd: overview
            .total_volume
            .get(VS_CURRENCY)
            .copied()
            .unwrap_or(0.0),
        market_cap_percentage,
        updated_at,
    })
}
