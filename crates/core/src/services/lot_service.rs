use crate::models::analytics::{LedgerTotals, LotResult};
use crate::models::currency::Currency;
use crate::models::transaction::Ledger;

/// Marks every purchase to the live quote, individually and in aggregate.
///
/// Pure — no I/O, no shared state.
pub struct LotService;

impl LotService {
    pub fn new() -> Self {
        Self
    }

    /// Compute per-lot results (ledger order, oldest first) and the
    /// ledger-wide totals.
    ///
    /// Percent fields are fractional returns; they are `None` wherever the
    /// denominator is zero (zero-cost lot, empty ledger) instead of
    /// infinity. The totals satisfy `totals.x == Σ lots[i].x` for the
    /// amount, cost, and value columns.
    pub fn analyze(
        &self,
        ledger: &Ledger,
        current_price: f64,
        currency: Currency,
    ) -> (Vec<LotResult>, LedgerTotals) {
        let lots: Vec<LotResult> = ledger
            .transactions()
            .iter()
            .map(|t| {
                let acquisition_cost = t.cost(currency);
                let current_value = t.btc_amount * current_price;
                let unrealized_pl = current_value - acquisition_cost;
                LotResult {
                    date: t.date,
                    btc_amount: t.btc_amount,
                    unit_price: t.unit_price(currency),
                    acquisition_cost,
                    current_value,
                    unrealized_pl,
                    unrealized_pl_percent: (acquisition_cost != 0.0)
                        .then(|| unrealized_pl / acquisition_cost),
                }
            })
            .collect();

        let btc_amount: f64 = lots.iter().map(|l| l.btc_amount).sum();
        let acquisition_cost: f64 = lots.iter().map(|l| l.acquisition_cost).sum();
        let current_value: f64 = lots.iter().map(|l| l.current_value).sum();
        let unrealized_pl = current_value - acquisition_cost;

        let totals = LedgerTotals {
            btc_amount,
            acquisition_cost,
            current_value,
            unrealized_pl,
            unrealized_pl_percent: (acquisition_cost != 0.0)
                .then(|| unrealized_pl / acquisition_cost),
            average_cost_basis: (btc_amount > 0.0).then(|| acquisition_cost / btc_amount),
        };

        (lots, totals)
    }
}

impl Default for LotService {
    fn default() -> Self {
        Self::new()
    }
}
