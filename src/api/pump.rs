use crate::allocation::UnitPrice;
use crate::errors::Result;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Coin data as served by the pump.fun frontend API. Only the fields the
/// simulator reads are typed; everything else is kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinData {
    pub mint: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub virtual_sol_reserves: u64,
    #[serde(default)]
    pub virtual_token_reserves: u64,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoinData {
    /// Spot price implied by the virtual reserves (lamports per smallest unit).
    pub fn unit_price(&self) -> Result<UnitPrice> {
        UnitPrice::new(self.virtual_sol_reserves, self.virtual_token_reserves)
    }
}

// Pump.fun frontend API client
pub struct PumpClient {
    client: Client,
    base_url: String,
}

impl PumpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.pump.fun/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.pump.fun"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches coin data for `mint`. A non-success status is logged and reported as `None`.
    pub async fn get_coin_data(&self, mint: &str) -> Result<Option<CoinData>> {
        let url = format!("{}/coins/{}", self.base_url, mint);
        debug!("Fetching coin data: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Failed to read error body".to_string());
            error!("Failed to retrieve coin data ({}): {}", status, error_text);
            return Ok(None);
        }

        let coin_data = response.json::<CoinData>().await?;
        debug!("Coin data for {}: {} ({})", mint, coin_data.name, coin_data.symbol);
        Ok(Some(coin_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimError;
    use serde_json::json;

    #[test]
    fn parses_coin_data_and_derives_price() {
        let raw = json!({
            "mint": "8oJNJTrr1b9e5beQ3PhBd9cSjQPfwqu3staCEVJpump",
            "name": "Example",
            "symbol": "EX",
            "virtual_sol_reserves": 30_000_000_000u64,
            "virtual_token_reserves": 1_073_000_000_000_000u64,
            "complete": false,
            "creator": "someone"
        });
        let coin: CoinData = serde_json::from_value(raw).unwrap();
        assert_eq!(coin.symbol, "EX");
        assert_eq!(coin.extra.get("creator"), Some(&json!("someone")));

        let price = coin.unit_price().unwrap();
        // 30e9 / 1.073e15 reduced
        assert_eq!(price.lamports_for(1_073_000).unwrap(), 30);
    }

    #[test]
    fn empty_reserves_give_no_price() {
        let coin: CoinData = serde_json::from_value(json!({ "mint": "m" })).unwrap();
        assert!(matches!(coin.unit_price(), Err(SimError::InvalidPrice(_))));
    }
}
