use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the entire btc-tracker-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Numeric degeneracies (zero denominators) are NOT errors: the affected
/// ratio field is `None` and the surrounding computation completes.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Invalid ledger entry: {0}")]
    InvalidLedgerEntry(String),

    // ── Alignment ───────────────────────────────────────────────────
    #[error("Price series out of order: {next} follows {prev}")]
    InvalidInputOrder { prev: NaiveDate, next: NaiveDate },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No market data provider registered")]
    NoProvider,

    #[error("Price not available in {currency} on {date}")]
    PriceNotAvailable {
        currency: String,
        date: String,
    },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs embedded in reqwest errors.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
