//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never floats. All amounts are `rust_decimal::Decimal` in the
//! currency's standard unit (dollars, not cents).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code: CurrencyCode::USD,
        }
    }

    /// The amount for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.amount * Decimal::from(quantity)
    }

    /// Format for display (e.g., `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(7999);
        assert_eq!(price.amount, Decimal::new(7999, 2));
        assert_eq!(price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_times_is_exact() {
        let price = Price::from_cents(7999);
        assert_eq!(price.times(2), Decimal::new(15998, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(19_99).display(), "$19.99");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
    }

    #[test]
    fn test_serde_amount_as_string() {
        // serde-with-str keeps decimal amounts exact on the wire
        let json = serde_json::to_string(&Price::from_cents(3499)).unwrap();
        assert!(json.contains("\"34.99\""));
    }
}
