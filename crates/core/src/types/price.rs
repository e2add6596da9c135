//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are always carried as [`Decimal`] so that cart totals never drift
//! the way floating point sums do (`46.00 * 2` is exactly `92.00`).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
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

    /// Create a USD price. The storefront only sells in USD today.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at the largest representable amount rather than overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .unwrap_or_else(|| saturated(self.amount));
        Self::new(amount, self.currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

/// The bound an overflowing amount clamps to, keeping the sign of `amount`.
fn saturated(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(
            self.currency_code, rhs.currency_code,
            "cannot add prices in different currencies"
        );
        let amount = self
            .amount
            .checked_add(rhs.amount)
            .unwrap_or_else(|| saturated(self.amount));
        Self::new(amount, self.currency_code)
    }
}

impl Sum for Price {
    /// Sums prices, taking the currency of the first element (USD when empty).
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<Self>, price| {
            Some(acc.map_or(price, |total| total + price))
        })
        .unwrap_or_else(|| Self::zero(CurrencyCode::default()))
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
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
    /// Display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
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
    fn test_display_two_decimals() {
        let price = Price::usd(Decimal::new(46, 0));
        assert_eq!(price.to_string(), "$46.00");

        let price = Price::new(Decimal::new(4950, 2), CurrencyCode::GBP);
        assert_eq!(price.display(), "£49.50");
    }

    #[test]
    fn test_times_is_exact() {
        let price = Price::usd(Decimal::new(4600, 2));
        assert_eq!(price.times(2).amount, Decimal::new(9200, 2));
        assert!(price.times(0).is_zero());
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = Price::usd(Decimal::MAX);
        assert_eq!(huge.times(2).amount, Decimal::MAX);
        assert_eq!((huge + huge).amount, Decimal::MAX);
        assert_eq!([huge, huge, huge].iter().sum::<Price>().amount, Decimal::MAX);

        let refund = Price::usd(Decimal::MIN);
        assert_eq!(refund.times(3).amount, Decimal::MIN);
        assert_eq!((refund + refund).amount, Decimal::MIN);
    }

    #[test]
    fn test_sum_empty_is_zero_usd() {
        let total: Price = Vec::<Price>::new().into_iter().sum();
        assert_eq!(total, Price::zero(CurrencyCode::USD));
    }

    #[test]
    fn test_sum_keeps_currency() {
        let prices = [
            Price::from_cents(1000, CurrencyCode::EUR),
            Price::from_cents(250, CurrencyCode::EUR),
        ];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_cents(1250, CurrencyCode::EUR));
    }

    #[test]
    fn test_deserialize_amount_from_string() {
        let price: Price = serde_json::from_str(r#"{"amount":"46.00"}"#).unwrap();
        assert_eq!(price, Price::from_cents(4600, CurrencyCode::USD));
    }
}
