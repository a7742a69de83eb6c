use chrono::{Days, NaiveDate};

use crate::errors::CoreError;
use crate::models::price::{PricePoint, PriceSeries, Quote};
use crate::models::transaction::Ledger;
use crate::providers::coingecko::CoinGeckoProvider;
use crate::providers::traits::MarketDataProvider;

/// How far the requested series window reaches back before the first
/// purchase, so the chart shows some price context ahead of it.
const SERIES_LEAD_DAYS: u64 = 15;

/// Fetches the daily series and the live quote from registered providers.
///
/// Providers are tried in registration order: if the first fails (API down,
/// rate limited), the next one is tried. Returned prices are validated as
/// finite and positive before they reach the engine.
pub struct PriceService {
    providers: Vec<Box<dyn MarketDataProvider>>,
}

impl PriceService {
    /// Create a service with no providers registered.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a service with the default CoinGecko provider.
    pub fn with_defaults() -> Self {
        let mut service = Self::new();
        service.register(Box::new(CoinGeckoProvider::new()));
        service
    }

    /// Register a provider. Earlier registrations are tried first.
    pub fn register(&mut self, provider: Box<dyn MarketDataProvider>) {
        self.providers.push(provider);
    }

    #[must_use]
    pub fn has_provider(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Names of all registered providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// The date window to request for a ledger: from `SERIES_LEAD_DAYS`
    /// before the first purchase through today. An empty ledger gets the
    /// lead window alone.
    #[must_use]
    pub fn series_window(ledger: &Ledger) -> (NaiveDate, NaiveDate) {
        let today = chrono::Utc::now().date_naive();
        let anchor = ledger.first_date().unwrap_or(today);
        let from = anchor
            .checked_sub_days(Days::new(SERIES_LEAD_DAYS))
            .unwrap_or(anchor);
        (from, today)
    }

    /// Fetch the daily series for `[from, to]`, with provider fallback.
    pub async fn fetch_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PriceSeries, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.daily_series(from, to).await {
                Ok(points) => match Self::validate_points(provider.name(), points) {
                    Ok(points) => return Ok(PriceSeries::new(points)),
                    Err(e) => last_error = Some(e),
                },
                Err(e) => {
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    /// Fetch the live quote, with provider fallback.
    pub async fn fetch_quote(&self) -> Result<Quote, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.current_quote().await {
                Ok(quote) => {
                    if Self::valid_price(quote.usd) && Self::valid_price(quote.brl) {
                        return Ok(quote);
                    }
                    last_error = Some(CoreError::Api {
                        provider: provider.name().to_string(),
                        message: format!(
                            "Invalid quote: {}/{} (must be finite and positive)",
                            quote.usd, quote.brl
                        ),
                    });
                }
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    fn valid_price(price: f64) -> bool {
        price.is_finite() && price > 0.0
    }

    fn validate_points(
        provider: &str,
        points: Vec<PricePoint>,
    ) -> Result<Vec<PricePoint>, CoreError> {
        for p in &points {
            if !Self::valid_price(p.price_usd) || !Self::valid_price(p.price_brl) {
                return Err(CoreError::Api {
                    provider: provider.to_string(),
                    message: format!(
                        "Invalid price on {}: {}/{} (must be finite and positive)",
                        p.date, p.price_usd, p.price_brl
                    ),
                });
            }
        }
        Ok(points)
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}
