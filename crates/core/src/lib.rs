pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    aligned::AlignedDay,
    analytics::{LedgerTotals, LotResult, PerformanceReport, PortfolioOverview, PortfolioSnapshot},
    currency::Currency,
    price::{PriceSeries, Quote},
    settings::Settings,
    transaction::{Ledger, Transaction},
};
use providers::traits::MarketDataProvider;
use services::{
    aggregation_service::AggregationService, alignment_service::AlignmentService,
    lot_service::LotService, performance_service::PerformanceService,
    price_service::PriceService,
};

use errors::CoreError;

/// Main entry point for the Bitcoin DCA tracker core library.
///
/// Holds the validated ledger and the services that operate on it. All
/// analytics entry points are pure: the tracker is re-run wholesale on each
/// refresh tick (the timer lives outside the core) rather than patched
/// incrementally, so every result is a fresh view over the same two inputs
/// plus the latest quote.
#[must_use]
pub struct BitcoinTracker {
    ledger: Ledger,
    settings: Settings,
    alignment_service: AlignmentService,
    aggregation_service: AggregationService,
    performance_service: PerformanceService,
    lot_service: LotService,
    price_service: PriceService,
}

impl std::fmt::Debug for BitcoinTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitcoinTracker")
            .field("transactions", &self.ledger.len())
            .field("settings", &self.settings)
            .field("providers", &self.price_service.provider_names())
            .finish()
    }
}

impl BitcoinTracker {
    /// Create a tracker over a validated ledger, with the default market
    /// data provider registered.
    pub fn new(ledger: Ledger) -> Self {
        Self::with_price_service(ledger, PriceService::with_defaults())
    }

    /// Create a tracker with a caller-supplied price service (e.g. custom
    /// or mock providers).
    pub fn with_price_service(ledger: Ledger, price_service: PriceService) -> Self {
        Self {
            ledger,
            settings: Settings::default(),
            alignment_service: AlignmentService::new(),
            aggregation_service: AggregationService::new(),
            performance_service: PerformanceService::new(),
            lot_service: LotService::new(),
            price_service,
        }
    }

    /// Load the ledger from the JSON file format and build a tracker.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(Self::new(Ledger::from_json_str(json)?))
    }

    /// Load the ledger from a JSON file on disk and build a tracker.
    pub fn from_json_file(path: &str) -> Result<Self, CoreError> {
        Ok(Self::new(Ledger::from_json_file(path)?))
    }

    // ── Ledger ──────────────────────────────────────────────────────

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All transactions, ascending by date.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Total BTC acquired across the ledger.
    #[must_use]
    pub fn total_btc(&self) -> f64 {
        self.ledger.total_btc()
    }

    /// Total cost across the ledger in the display currency.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.ledger.total_cost(self.settings.display_currency)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the currency in which portfolio values are reported.
    pub fn set_display_currency(&mut self, currency: Currency) {
        self.settings.display_currency = currency;
    }

    // ── Market data ─────────────────────────────────────────────────

    /// Register an additional market data provider (fallback order).
    pub fn register_provider(&mut self, provider: Box<dyn MarketDataProvider>) {
        self.price_service.register(provider);
    }

    /// The date window to request for this ledger's series:
    /// 15 days before the first purchase through today.
    #[must_use]
    pub fn series_window(&self) -> (NaiveDate, NaiveDate) {
        PriceService::series_window(&self.ledger)
    }

    /// Fetch the daily price series for this ledger's window.
    pub async fn fetch_price_series(&self) -> Result<PriceSeries, CoreError> {
        let (from, to) = self.series_window();
        self.price_service.fetch_series(from, to).await
    }

    /// Fetch the live quote.
    pub async fn fetch_current_quote(&self) -> Result<Quote, CoreError> {
        self.price_service.fetch_quote().await
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Merge the ledger with a daily price series.
    pub fn align(&self, series: &PriceSeries) -> Result<Vec<AlignedDay>, CoreError> {
        self.alignment_service.align(&self.ledger, series)
    }

    /// One portfolio snapshot per aligned day, in the display currency.
    #[must_use]
    pub fn portfolio_snapshots(&self, aligned: &[AlignedDay]) -> Vec<PortfolioSnapshot> {
        self.aggregation_service
            .snapshots(&self.ledger, aligned, self.settings.display_currency)
    }

    /// 1-day and 7-day performance against the live quote, in the display
    /// currency.
    #[must_use]
    pub fn performance(&self, aligned: &[AlignedDay], quote: Quote) -> PerformanceReport {
        let currency = self.settings.display_currency;
        self.performance_service.compute_windows(
            aligned,
            quote.price(currency),
            self.ledger.total_btc(),
            currency,
        )
    }

    /// Per-lot results and ledger totals against the live quote, in the
    /// display currency.
    #[must_use]
    pub fn lots(&self, quote: Quote) -> (Vec<LotResult>, LedgerTotals) {
        let currency = self.settings.display_currency;
        self.lot_service
            .analyze(&self.ledger, quote.price(currency), currency)
    }

    /// Compute the full dashboard from an already-resolved series and quote.
    ///
    /// Pure and idempotent — this is the offline counterpart of `refresh`.
    pub fn overview(
        &self,
        series: &PriceSeries,
        quote: Quote,
    ) -> Result<PortfolioOverview, CoreError> {
        let aligned_days = self.align(series)?;
        let snapshots = self.portfolio_snapshots(&aligned_days);
        let performance = self.performance(&aligned_days, quote);
        let (lots, totals) = self.lots(quote);

        Ok(PortfolioOverview {
            currency: self.settings.display_currency,
            quote,
            aligned_days,
            snapshots,
            performance,
            lots,
            totals,
        })
    }

    /// Fetch fresh market data and recompute the full dashboard.
    ///
    /// Intended to be called on a refresh timer by the embedding
    /// application; each call recomputes everything from the ledger and
    /// the newly fetched data.
    pub async fn refresh(&self) -> Result<PortfolioOverview, CoreError> {
        let series = self.fetch_price_series().await?;
        let quote = self.fetch_current_quote().await?;
        self.overview(&series, quote)
    }
}
