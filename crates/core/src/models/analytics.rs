use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aligned::AlignedDay;
use super::currency::Currency;
use super::price::Quote;

/// Portfolio state as of one day of the aligned sequence.
///
/// `btc_held_to_date` and `invested_to_date` are forward-filled: they carry
/// the cumulative totals of the latest purchase dated on or before this day,
/// so the value curve is continuous between purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Date this snapshot was computed for
    pub date: NaiveDate,

    /// Capital invested up to and including this date
    pub invested_to_date: f64,

    /// BTC held up to and including this date
    pub btc_held_to_date: f64,

    /// `btc_held_to_date` × this day's price
    pub market_value: f64,
}

/// Price and portfolio deltas against a fixed lookback baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceWindow {
    /// Current price minus the baseline price
    pub price_change: f64,

    /// Price change relative to the baseline, ×100.
    /// `None` when the baseline price is zero.
    pub price_change_percent: Option<f64>,

    /// `price_change` × total BTC held
    pub portfolio_change: f64,

    /// Equals `price_change_percent`: holdings are constant across the
    /// window, so the portfolio moves proportionally with the price.
    pub portfolio_change_percent: Option<f64>,
}

/// The 1-day and 7-day lookback windows, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub daily: PerformanceWindow,
    pub weekly: PerformanceWindow,
}

/// One purchase marked to the live quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotResult {
    /// Date of the purchase
    pub date: NaiveDate,

    /// BTC acquired in this lot
    pub btc_amount: f64,

    /// Purchase price per BTC (cost / amount)
    pub unit_price: f64,

    /// What was paid for the lot
    pub acquisition_cost: f64,

    /// `btc_amount` × live price
    pub current_value: f64,

    /// `current_value - acquisition_cost`
    pub unrealized_pl: f64,

    /// Fractional return (`0.10` = +10%): `unrealized_pl / acquisition_cost`.
    /// `None` for a zero-cost acquisition.
    pub unrealized_pl_percent: Option<f64>,
}

/// Ledger-wide totals across all lots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Total BTC acquired
    pub btc_amount: f64,

    /// Total paid across all lots
    pub acquisition_cost: f64,

    /// Total value at the live price
    pub current_value: f64,

    /// `current_value - acquisition_cost`
    pub unrealized_pl: f64,

    /// Fractional return over the whole ledger. `None` when nothing was paid.
    pub unrealized_pl_percent: Option<f64>,

    /// Weighted-average cost basis: total cost / total BTC.
    /// `None` only for an empty ledger.
    pub average_cost_basis: Option<f64>,
}

/// The full recomputed dashboard for one refresh tick.
///
/// Everything a frontend needs to render, with no further computation:
/// the aligned sequence for the price/DCA chart, snapshots for the
/// portfolio-value chart, the performance cards, and the lot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    /// Currency every monetary value below is quoted in
    pub currency: Currency,

    /// The live quote the overview was computed against
    pub quote: Quote,

    /// Price series annotated with purchases and running DCA
    pub aligned_days: Vec<AlignedDay>,

    /// One snapshot per aligned day
    pub snapshots: Vec<PortfolioSnapshot>,

    /// 1-day and 7-day performance
    pub performance: PerformanceReport,

    /// Per-purchase results, ledger order (oldest first); presentation
    /// reordering is the caller's concern
    pub lots: Vec<LotResult>,

    /// Ledger-wide totals
    pub totals: LedgerTotals,
}
