use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::{PricePoint, Quote};

/// Trait abstraction for market data sources.
///
/// The engine itself never touches the network; it consumes an
/// already-resolved series and quote. Implementations of this trait are the
/// only async boundary in the crate, and swapping an API means replacing
/// one implementation — the rest of the codebase is untouched.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for errors).
    fn name(&self) -> &str;

    /// The live BTC price in both quote currencies.
    async fn current_quote(&self) -> Result<Quote, CoreError>;

    /// Daily BTC prices covering `[from, to]`, both currencies per day,
    /// sorted ascending by date.
    async fn daily_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
