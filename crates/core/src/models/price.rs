use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// One daily price observation, quoted in both currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price_usd: f64,
    pub price_brl: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price_usd: f64, price_brl: f64) -> Self {
        Self {
            date,
            price_usd,
            price_brl,
        }
    }

    /// The observation in the given currency.
    #[must_use]
    pub fn price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.price_usd,
            Currency::Brl => self.price_brl,
        }
    }
}

/// A daily price series over a requested date window.
///
/// Supplied externally (market-data provider) already sorted ascending by
/// date, one observation per calendar day. The alignment step verifies the
/// ordering rather than re-sorting — a regression in the input is an error,
/// not something to paper over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// The live price pair, refreshed independently of the daily series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub usd: f64,
    pub brl: f64,
}

impl Quote {
    pub fn new(usd: f64, brl: f64) -> Self {
        Self { usd, brl }
    }

    /// The live price in the given currency.
    #[must_use]
    pub fn price(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.usd,
            Currency::Brl => self.brl,
        }
    }
}
