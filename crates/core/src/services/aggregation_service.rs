use crate::models::aligned::AlignedDay;
use crate::models::analytics::PortfolioSnapshot;
use crate::models::currency::Currency;
use crate::models::transaction::Ledger;

/// Accumulates the aligned sequence into one portfolio snapshot per day.
///
/// Pure — no I/O, no shared state.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Walk the aligned days, carrying BTC held and capital invested
    /// forward from the latest transaction dated on or before each day.
    ///
    /// Forward fill keeps the value curve continuous between purchases;
    /// before the first purchase both totals are zero and the market
    /// value is zero.
    pub fn snapshots(
        &self,
        ledger: &Ledger,
        aligned: &[AlignedDay],
        currency: Currency,
    ) -> Vec<PortfolioSnapshot> {
        let transactions = ledger.transactions();
        let mut next_tx = 0;
        let mut btc_held = 0.0;
        let mut invested = 0.0;

        aligned
            .iter()
            .map(|day| {
                // Fold in every transaction up to and including this day.
                while next_tx < transactions.len() && transactions[next_tx].date <= day.date {
                    btc_held += transactions[next_tx].btc_amount;
                    invested += transactions[next_tx].cost(currency);
                    next_tx += 1;
                }

                PortfolioSnapshot {
                    date: day.date,
                    invested_to_date: invested,
                    btc_held_to_date: btc_held,
                    market_value: btc_held * day.price(currency),
                }
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
