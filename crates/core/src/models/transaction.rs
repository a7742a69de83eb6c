use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use crate::errors::CoreError;

/// A single Bitcoin purchase.
///
/// **Important**: the cost in each quote currency is recorded independently
/// at purchase time — neither is derived from the other by conversion.
/// The purchase unit price is derived (`cost / btc_amount`), never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Date of the purchase (no time component — daily granularity)
    pub date: NaiveDate,

    /// Amount of BTC acquired (always positive)
    pub btc_amount: f64,

    /// Cost paid in US dollars
    pub cost_usd: f64,

    /// Cost paid in Brazilian reais
    pub cost_brl: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, btc_amount: f64, cost_usd: f64, cost_brl: f64) -> Self {
        Self {
            date,
            btc_amount,
            cost_usd,
            cost_brl,
        }
    }

    /// Cost paid in the given currency.
    #[must_use]
    pub fn cost(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => self.cost_usd,
            Currency::Brl => self.cost_brl,
        }
    }

    /// Effective purchase price per BTC in the given currency.
    /// Well-defined because `btc_amount` is validated positive at load.
    #[must_use]
    pub fn unit_price(&self, currency: Currency) -> f64 {
        self.cost(currency) / self.btc_amount
    }
}

// ── Ledger file format ──────────────────────────────────────────────

/// One entry of the on-disk ledger file, before validation.
///
/// The file records the purchase unit price (`btcPrice`) alongside the cost,
/// but it is derivable and therefore ignored on load.
#[derive(Debug, Deserialize)]
struct RawEntry {
    date: String,
    #[serde(rename = "btcAmount")]
    btc_amount: f64,
    #[serde(rename = "usdAmount")]
    usd_amount: f64,
    #[serde(rename = "brlAmount")]
    brl_amount: f64,
    #[serde(rename = "btcPrice")]
    #[allow(dead_code)]
    btc_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLedgerFile {
    transactions: Vec<RawEntry>,
}

/// Ledger dates may be plain calendar days or full RFC 3339 timestamps;
/// timestamps are truncated to their UTC calendar day.
fn parse_ledger_date(raw: &str) -> Result<NaiveDate, CoreError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_utc().date_naive())
        .map_err(|_| {
            CoreError::InvalidLedgerEntry(format!("unparseable date '{raw}'"))
        })
}

// ── Ledger ──────────────────────────────────────────────────────────

/// An immutable, date-ordered collection of purchases.
///
/// Validated once at construction:
/// - every `btc_amount` is positive and finite
/// - every cost is non-negative and finite
/// - at most one transaction per calendar day
///
/// After validation the transactions are sorted ascending by date, which is
/// what makes the same-day lookup a binary search.
///
/// Serializes for export but deliberately does not implement `Deserialize`:
/// the only way in is a validating constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Build a ledger from raw transactions, validating and sorting them.
    pub fn new(mut transactions: Vec<Transaction>) -> Result<Self, CoreError> {
        for t in &transactions {
            Self::validate_entry(t)?;
        }

        transactions.sort_by_key(|t| t.date);

        // One entry per calendar day: duplicates are rejected, never merged
        // or dropped.
        for pair in transactions.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(CoreError::InvalidLedgerEntry(format!(
                    "duplicate transaction date {}",
                    pair[0].date
                )));
            }
        }

        Ok(Self { transactions })
    }

    /// An empty ledger. Every analytics call is still total over it.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Parse a ledger from the JSON file format:
    /// `{"transactions": [{"date", "btcAmount", "usdAmount", "brlAmount", ...}]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let raw: RawLedgerFile = serde_json::from_str(json)?;
        let transactions = raw
            .transactions
            .into_iter()
            .map(|e| {
                Ok(Transaction::new(
                    parse_ledger_date(&e.date)?,
                    e.btc_amount,
                    e.usd_amount,
                    e.brl_amount,
                ))
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Self::new(transactions)
    }

    /// Load a ledger from a JSON file on disk.
    pub fn from_json_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate_entry(t: &Transaction) -> Result<(), CoreError> {
        if !t.btc_amount.is_finite() || t.btc_amount <= 0.0 {
            return Err(CoreError::InvalidLedgerEntry(format!(
                "BTC amount must be positive, got {} on {}",
                t.btc_amount, t.date
            )));
        }
        for (cost, currency) in [(t.cost_usd, Currency::Usd), (t.cost_brl, Currency::Brl)] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(CoreError::InvalidLedgerEntry(format!(
                    "{currency} cost must be non-negative, got {cost} on {}",
                    t.date
                )));
            }
        }
        Ok(())
    }

    /// All transactions, ascending by date.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Date of the earliest purchase, if any.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.transactions.first().map(|t| t.date)
    }

    /// Look up the transaction on an exact date (at most one per day).
    #[must_use]
    pub fn transaction_on(&self, date: NaiveDate) -> Option<&Transaction> {
        self.transactions
            .binary_search_by_key(&date, |t| t.date)
            .ok()
            .map(|idx| &self.transactions[idx])
    }

    /// Total BTC acquired across the whole ledger.
    #[must_use]
    pub fn total_btc(&self) -> f64 {
        self.transactions.iter().map(|t| t.btc_amount).sum()
    }

    /// Total cost across the whole ledger in the given currency.
    #[must_use]
    pub fn total_cost(&self, currency: Currency) -> f64 {
        self.transactions.iter().map(|t| t.cost(currency)).sum()
    }
}
