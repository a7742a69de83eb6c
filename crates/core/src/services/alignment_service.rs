use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::aligned::AlignedDay;
use crate::models::price::PriceSeries;
use crate::models::transaction::{Ledger, Transaction};

/// Running cost-basis accumulator carried through the alignment fold.
///
/// Immutable: applying a transaction returns a new accumulator rather than
/// mutating shared state, so intermediate states stay inspectable in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RunningBasis {
    btc: f64,
    cost_usd: f64,
    cost_brl: f64,
}

impl RunningBasis {
    fn apply(self, t: &Transaction) -> Self {
        Self {
            btc: self.btc + t.btc_amount,
            cost_usd: self.cost_usd + t.cost_usd,
            cost_brl: self.cost_brl + t.cost_brl,
        }
    }

    fn dca_usd(&self) -> Option<f64> {
        (self.btc > 0.0).then(|| self.cost_usd / self.btc)
    }

    fn dca_brl(&self) -> Option<f64> {
        (self.btc > 0.0).then(|| self.cost_brl / self.btc)
    }
}

/// Merges the ledger and the daily price series into one ordered sequence
/// of annotated days.
///
/// Pure — no I/O, no shared state. Recomputes from scratch on every call.
pub struct AlignmentService;

impl AlignmentService {
    pub fn new() -> Self {
        Self
    }

    /// Align a ledger with a daily price series.
    ///
    /// For each price point in order:
    /// 1. Verify the date advances (the series is not re-sorted; a
    ///    regression fails with `InvalidInputOrder`)
    /// 2. Match the same-day transaction by exact date, if any
    /// 3. Fold the matched transaction into the running basis *before*
    ///    computing the day's DCA, so a purchase day already reflects
    ///    that purchase
    ///
    /// The output has exactly one `AlignedDay` per price point, in the
    /// same order.
    pub fn align(
        &self,
        ledger: &Ledger,
        series: &PriceSeries,
    ) -> Result<Vec<AlignedDay>, CoreError> {
        let mut days = Vec::with_capacity(series.len());
        let mut basis = RunningBasis::default();
        let mut prev_date: Option<NaiveDate> = None;

        for point in series.points() {
            if let Some(prev) = prev_date {
                if point.date <= prev {
                    return Err(CoreError::InvalidInputOrder {
                        prev,
                        next: point.date,
                    });
                }
            }
            prev_date = Some(point.date);

            let transaction = ledger.transaction_on(point.date).cloned();
            if let Some(t) = &transaction {
                basis = basis.apply(t);
            }

            days.push(AlignedDay {
                date: point.date,
                price_usd: point.price_usd,
                price_brl: point.price_brl,
                transaction,
                dca_usd: basis.dca_usd(),
                dca_brl: basis.dca_brl(),
            });
        }

        Ok(days)
    }
}

impl Default for AlignmentService {
    fn default() -> Self {
        Self::new()
    }
}
