//! Engine configuration.

use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Settings for newly created carts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Currency used to display totals.
    #[serde(default)]
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.currency, Currency::USD);
    }

    #[test]
    fn test_cart_uses_configured_currency() {
        let config: CartConfig = serde_json::from_str(r#"{ "currency": "EUR" }"#).unwrap();
        assert_eq!(Cart::with_config(&config).total().display(), "\u{20ac}0.00");
    }
}
