use serde::{Deserialize, Serialize};

/// One of the two quote currencies the tracker records.
///
/// Every purchase carries its cost in both currencies, independently recorded
/// at purchase time (not derived by FX conversion). All currency-specific
/// accessors in the crate select a side with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar
    Usd,
    /// Brazilian real
    Brl,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
            Currency::Brl => write!(f, "BRL"),
        }
    }
}
