use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::transaction::Transaction;

/// One calendar day of the price series, annotated with the same-day
/// purchase (if any) and the running cost basis as of that day.
///
/// Recomputed on every alignment call — never cached, never mutated.
///
/// `dca_usd`/`dca_brl` are `None` until cumulative BTC held becomes
/// positive; after that they equal cumulative cost / cumulative BTC over
/// all transactions dated on or before this day. A purchase made on this
/// day is already reflected in the day's DCA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedDay {
    pub date: NaiveDate,
    pub price_usd: f64,
    pub price_brl: f64,

    /// The purchase made on this exact date, if any (at most one per day).
    pub transaction: Option<Transaction>,

    /// Running dollar-cost average in USD, `None` before the first purchase.
    pub dca_usd: Option<f64>,

    /// Running dollar-cost average in BRL, `None` before the first purchase.
    pub dca_brl: Option<f64>,
}

impl AlignedDay {
    /// Whether a purchase happened on this day.
    #[must_use]
    pub fn has_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// The day's price in the given currency.
    #[must_use]
    pub fn price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.price_usd,
            Currency::Brl => self.price_brl,
        }
    }

    /// The day's running cost basis in the given currency.
    #[must_use]
    pub fn dca(&self, currency: Currency) -> Option<f64> {
        match currency {
            Currency::Usd => self.dca_usd,
            Currency::Brl => self.dca_brl,
        }
    }
}
