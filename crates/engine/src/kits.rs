//! Curated skin kits shown alongside the routine.

use serde::{Deserialize, Serialize};
use skin_routine_core::{Price, ProductSlug};

use crate::catalog::usd_amount;

/// A pre-bundled kit sold at a discount to its retail value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    /// Cart key for the kit.
    pub slug: ProductSlug,
    /// Display name.
    pub name: String,
    /// Selling price.
    #[serde(with = "usd_amount")]
    pub price: Price,
    /// Combined retail value of the kit contents.
    #[serde(with = "usd_amount")]
    pub retail_price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Badge text (e.g. "Great For Gifting").
    #[serde(default)]
    pub label: String,
}

impl Kit {
    /// How much the kit saves over buying the contents at retail.
    /// Never negative.
    #[must_use]
    pub fn savings(&self) -> Price {
        let diff = self.retail_price.amount - self.price.amount;
        Price::new(diff.max(rust_decimal::Decimal::ZERO), self.price.currency_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_savings() {
        let kit: Kit = serde_json::from_str(
            r#"{"slug":"discover-healthy-skin-kit","name":"discover healthy skin kit","price":"39.50","retail_price":"59.00"}"#,
        )
        .unwrap();
        assert_eq!(kit.savings().amount, Decimal::new(1950, 2));
        assert_eq!(kit.savings().to_string(), "$19.50");
    }

    #[test]
    fn test_savings_never_negative() {
        let kit: Kit = serde_json::from_str(
            r#"{"slug":"k","name":"k","price":"80.00","retail_price":"60.00"}"#,
        )
        .unwrap();
        assert!(kit.savings().is_zero());
    }
}
