use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::price::{PricePoint, Quote};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko market data for Bitcoin.
///
/// - **Free**: no API key required.
/// - **Endpoints**: `/coins/bitcoin/market_chart` (daily history, one quote
///   currency per call) and `/simple/price` (live quote, both currencies
///   in one call).
///
/// The daily series needs both currencies per day, so history is fetched
/// once per currency and the two responses are merged by calendar day.
pub struct CoinGeckoProvider {
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch the daily close series for one quote currency, keyed by day.
    ///
    /// `market_chart` returns millisecond timestamps; the final entry is
    /// the live price carrying today's date, so a later entry for the same
    /// day overwrites an earlier one.
    async fn daily_closes(
        &self,
        vs_currency: &str,
        days: i64,
    ) -> Result<BTreeMap<NaiveDate, f64>, CoreError> {
        let url = format!(
            "{BASE_URL}/coins/bitcoin/market_chart?vs_currency={vs_currency}&days={days}&interval=daily"
        );

        let resp: MarketChartResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse {vs_currency} market chart: {e}"),
            })?;

        let mut closes = BTreeMap::new();
        for (timestamp_ms, price) in resp.prices {
            if let Some(dt) = chrono::DateTime::from_timestamp_millis(timestamp_ms) {
                closes.insert(dt.date_naive(), price);
            }
        }
        Ok(closes)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs
    prices: Vec<(i64, f64)>,
}

#[derive(Deserialize)]
struct SimplePriceResponse {
    bitcoin: SimplePriceEntry,
}

#[derive(Deserialize)]
struct SimplePriceEntry {
    usd: f64,
    brl: f64,
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn current_quote(&self) -> Result<Quote, CoreError> {
        let url = format!("{BASE_URL}/simple/price?ids=bitcoin&vs_currencies=usd,brl");

        let resp: SimplePriceResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse live quote: {e}"),
            })?;

        Ok(Quote::new(resp.bitcoin.usd, resp.bitcoin.brl))
    }

    async fn daily_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        // market_chart counts days back from now, not from an arbitrary
        // anchor, so request enough to reach `from` and trim afterwards.
        let today = chrono::Utc::now().date_naive();
        let days = (today - from).num_days().max(1);

        let usd = self.daily_closes("usd", days).await?;
        let brl = self.daily_closes("brl", days).await?;

        // Keep only days present in both currencies; the windows differ by
        // at most the in-flight current-price entry.
        let points: Vec<PricePoint> = usd
            .into_iter()
            .filter(|(date, _)| *date >= from && *date <= to)
            .filter_map(|(date, price_usd)| {
                brl.get(&date)
                    .map(|price_brl| PricePoint::new(date, price_usd, *price_brl))
            })
            .collect();

        if points.is_empty() {
            return Err(CoreError::PriceNotAvailable {
                currency: "USD/BRL".into(),
                date: format!("{from}..{to}"),
            });
        }

        Ok(points)
    }
}
