use tracing::debug;

use crate::error::{Error, Result};
use crate::provider::{CoinListing, MarketDataProvider};

/// Normalize a user-supplied ticker: trim, lower-case, drop one trailing
/// `-usd` suffix (so `BTC-USD` and `btc` look up the same coin).
pub fn normalize_symbol(symbol: &str) -> String {
    let lower = symbol.trim().to_lowercase();
    match lower.strip_suffix("-usd") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Resolve a ticker symbol to the provider's canonical coin listing.
///
/// Fetches the complete coin list on every call (no caching -- always
/// current relative to the provider, at the cost of one list fetch per
/// operation) and scans it in provider order. Several listings can share a
/// ticker; the first case-insensitive match wins.
pub async fn resolve(provider: &dyn MarketDataProvider, symbol: &str) -> Result<CoinListing> {
    let wanted = normalize_symbol(symbol);
    let listings = provider.get_coins_list().await?;

    debug!(symbol, normalized = %wanted, listings = listings.len(), "resolving symbol");

    listings
        .into_iter()
        .find(|coin| coin.symbol.to_lowercase() == wanted)
        .ok_or_else(|| Error::SymbolNotFound(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::provider::{
        CoinDetail, GlobalOverview, MarketChart, SimplePrice, TrendingResponse,
    };

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_symbol("BTC"), "btc");
        assert_eq!(normalize_symbol("Doge"), "doge");
    }

    #[test]
    fn normalize_strips_trailing_usd_suffix() {
        assert_eq!(normalize_symbol("BTC-USD"), "btc");
        assert_eq!(normalize_symbol("eth-usd"), "eth");
        assert_eq!(normalize_symbol("Btc-Usd"), "btc");
    }

    #[test]
    fn normalize_keeps_non_suffix_matches() {
        // Only a trailing suffix is dropped.
        assert_eq!(normalize_symbol("usd"), "usd");
        assert_eq!(normalize_symbol("usdc"), "usdc");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_symbol("  btc "), "btc");
    }

    struct StubProvider {
        listings: Vec<CoinListing>,
    }

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn get_coins_list(&self) -> Result<Vec<CoinListing>> {
            Ok(self.listings.clone())
        }

        async fn get_simple_price(&self, _id: &str, _vs: &str) -> Result<SimplePrice> {
            Err(Error::Api("not used".into()))
        }

        async fn get_coin_detail(&self, _id: &str) -> Result<CoinDetail> {
            Err(Error::Api("not used".into()))
        }

        async fn get_market_chart(&self, _id: &str, _vs: &str, _days: u32) -> Result<MarketChart> {
            Err(Error::Api("not used".into()))
        }

        async fn get_trending(&self) -> Result<TrendingResponse> {
            Err(Error::Api("not used".into()))
        }

        async fn get_global(&self) -> Result<GlobalOverview> {
            Err(Error::Api("not used".into()))
        }
    }

    fn listing(id: &str, symbol: &str, name: &str) -> CoinListing {
        CoinListing {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn resolve_first_match_wins_on_shared_tickers() {
        let stub = StubProvider {
            listings: vec![
                listing("bitcoin", "btc", "Bitcoin"),
                listing("batcat", "btc", "Batcat"),
            ],
        };

        let coin = resolve(&stub, "BTC").await.unwrap();
        assert_eq!(coin.id, "bitcoin");
    }

    #[tokio::test]
    async fn resolve_reports_original_input_when_unknown() {
        let stub = StubProvider {
            listings: vec![listing("bitcoin", "btc", "Bitcoin")],
        };

        let err = resolve(&stub, "XYZ-USD").await.unwrap_err();
        assert!(matches!(err, Error::SymbolNotFound(ref s) if s == "XYZ-USD"));
    }
}
