//! Monetary amounts, as the remote API reports them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the lab's billing currency.
///
/// The portal never computes prices - discounts, totals, and refund amounts
/// all arrive from the remote API. This type only carries them to templates
/// without floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Wrap an amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$1,250.00" without the grouping - "$1250.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(125_050, 2)); // 1250.50
        assert_eq!(price.display(), "$1250.50");

        let whole = Price::new(Decimal::new(40, 0));
        assert_eq!(whole.display(), "$40.00");
    }

    #[test]
    fn test_serde_string_amount() {
        // serde-with-str: the API sends amounts as JSON strings.
        let price: Price = serde_json::from_str("\"199.99\"").unwrap();
        assert_eq!(price.amount(), Decimal::new(19_999, 2));
    }
}
