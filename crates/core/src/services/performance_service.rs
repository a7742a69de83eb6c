use crate::models::aligned::AlignedDay;
use crate::models::analytics::{PerformanceReport, PerformanceWindow};
use crate::models::currency::Currency;

/// Days of lookback for the "daily" window.
const DAILY_LOOKBACK: usize = 1;

/// Days of lookback for the "weekly" window.
const WEEKLY_LOOKBACK: usize = 7;

/// Derives short-horizon performance deltas from the aligned sequence and
/// a live price.
///
/// Pure — no I/O, no shared state.
pub struct PerformanceService;

impl PerformanceService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the 1-day and 7-day windows against `current_price`.
    ///
    /// The baseline for an N-day window is the price N days back from the
    /// end of the aligned sequence. When the sequence is too short to reach
    /// that far, the baseline falls back to `current_price` — a defined
    /// degenerate case yielding zero change, not an error.
    ///
    /// `btc_held` is the total BTC across the ledger; the window does not
    /// model intra-window purchases, so the portfolio delta is simply the
    /// price delta scaled by holdings.
    pub fn compute_windows(
        &self,
        aligned: &[AlignedDay],
        current_price: f64,
        btc_held: f64,
        currency: Currency,
    ) -> PerformanceReport {
        PerformanceReport {
            daily: self.window(aligned, DAILY_LOOKBACK, current_price, btc_held, currency),
            weekly: self.window(aligned, WEEKLY_LOOKBACK, current_price, btc_held, currency),
        }
    }

    fn window(
        &self,
        aligned: &[AlignedDay],
        lookback: usize,
        current_price: f64,
        btc_held: f64,
        currency: Currency,
    ) -> PerformanceWindow {
        let previous_price = aligned
            .len()
            .checked_sub(lookback + 1)
            .map(|idx| aligned[idx].price(currency))
            .unwrap_or(current_price);

        let price_change = current_price - previous_price;
        // A zero baseline has no meaningful relative change; report "no
        // value" rather than infinity.
        let price_change_percent =
            (previous_price != 0.0).then(|| price_change / previous_price * 100.0);

        PerformanceWindow {
            price_change,
            price_change_percent,
            portfolio_change: price_change * btc_held,
            portfolio_change_percent: price_change_percent,
        }
    }
}

impl Default for PerformanceService {
    fn default() -> Self {
        Self::new()
    }
}
