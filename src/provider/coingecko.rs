use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{
    CoinDetail, CoinListing, GlobalOverview, GlobalResponse, MarketChart, MarketDataProvider,
    SimplePrice, TrendingResponse,
};
use crate::error::{Error, Result};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko market data client -- free public API, no key required.
pub struct CoinGecko {
    client: Client,
    base_url: String,
}

impl CoinGecko {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Build a client against an alternative base URL (tests, proxies).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .user_agent("crypto-trader/0.1.0")
            .build()
            .expect("failed to build HTTP client");
        Self { client, base_url }
    }

    /// GET `url` and decode the JSON body, mapping non-success statuses to
    /// `Error::Api` and decode failures to `Error::Parse`.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!(url = %url, what, "fetching from CoinGecko");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        debug!(status = %status, body_len = body.len(), what, "CoinGecko response");
        trace!(body = %body, "CoinGecko response body");

        if !status.is_success() {
            return Err(Error::Api(format!(
                "CoinGecko returned {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("CoinGecko {} JSON: {}", what, e)))
    }
}

#[async_trait]
impl MarketDataProvider for CoinGecko {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn get_coins_list(&self) -> Result<Vec<CoinListing>> {
        let url = format!("{}/coins/list", self.base_url);
        self.fetch_json(&url, "coins list").await
    }

    async fn get_simple_price(&self, id: &str, vs_currency: &str) -> Result<SimplePrice> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}&include_24hr_change=true&include_24hr_vol=true&include_market_cap=true",
            self.base_url,
            id,
            vs_currency.to_lowercase()
        );
        self.fetch_json(&url, "simple price").await
    }

    async fn get_coin_detail(&self, id: &str) -> Result<CoinDetail> {
        let url = format!("{}/coins/{}", self.base_url, id);
        self.fetch_json(&url, "coin detail").await
    }

    async fn get_market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            id,
            vs_currency.to_lowercase(),
            days
        );
        self.fetch_json(&url, "market chart").await
    }

    async fn get_trending(&self) -> Result<TrendingResponse> {
        let url = format!("{}/search/trending", self.base_url);
        self.fetch_json(&url, "trending").await
    }

    async fn get_global(&self) -> Result<GlobalOverview> {
        let url = format!("{}/global", self.base_url);
        let resp: GlobalResponse = self.fetch_json(&url, "global stats").await?;
        Ok(resp.data)
    }
}
