use serde::{Deserialize, Serialize};

/// User-configurable display settings for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Symbol prefixed to formatted amounts (e.g., "Rs.", "$", "€").
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rs.".to_string(),
        }
    }
}
