use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// User-configurable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which portfolio values are reported.
    pub display_currency: Currency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: Currency::Usd,
        }
    }
}
