//! In-memory cart reconciliation.
//!
//! Items are keyed by `(product, size)`: the same product may appear at
//! several sizes. Totals are recomputed from the item list on every read.

use serde::{Deserialize, Serialize};
use skin_routine_core::{Price, ProductSlug};

use crate::catalog::STANDARD_SIZE;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductSlug,
    pub size: String,
    pub unit_price: Price,
    /// Display name captured on first add.
    pub name: String,
    /// Always at least 1; a line at zero is removed.
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    fn is(&self, product: &ProductSlug, size: &str) -> bool {
        &self.product == product && self.size == size
    }
}

/// An ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product` at `size`.
    ///
    /// An empty size is treated as [`STANDARD_SIZE`]. If the line already
    /// exists its quantity is incremented and `unit_price`/`name` are ignored.
    pub fn add(&mut self, product: &ProductSlug, size: &str, unit_price: Price, name: &str) {
        let size = normalize_size(size);
        if let Some(item) = self.items.iter_mut().find(|item| item.is(product, size)) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem {
            product: product.clone(),
            size: size.to_string(),
            unit_price,
            name: name.to_string(),
            quantity: 1,
        });
    }

    /// Remove one unit of `product` at `size`. Unknown lines are ignored.
    pub fn remove(&mut self, product: &ProductSlug, size: &str) {
        let size = normalize_size(size);
        let Some(index) = self.items.iter().position(|item| item.is(product, size)) else {
            return;
        };
        match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => item.quantity -= 1,
            Some(_) => {
                self.items.remove(index);
            }
            None => {}
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of unit price times quantity. USD zero when empty.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_price).sum()
    }

    /// Whether any size of `product` is in the cart.
    #[must_use]
    pub fn contains_product(&self, product: &ProductSlug) -> bool {
        self.items.iter().any(|item| &item.product == product)
    }

    /// Quantity of one `(product, size)` line, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product: &ProductSlug, size: &str) -> u32 {
        let size = normalize_size(size);
        self.items
            .iter()
            .find(|item| item.is(product, size))
            .map_or(0, |item| item.quantity)
    }
}

fn normalize_size(size: &str) -> &str {
    if size.is_empty() { STANDARD_SIZE } else { size }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use skin_routine_core::CurrencyCode;

    use super::*;

    fn gel() -> ProductSlug {
        ProductSlug::new("special-cleansing-gel")
    }

    fn usd(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::USD)
    }

    #[test]
    fn test_add_twice_increments_quantity() {
        let mut cart = Cart::new();
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_price().amount, Decimal::new(9200, 2));
    }

    #[test]
    fn test_first_write_wins_for_price_and_name() {
        let mut cart = Cart::new();
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(1), "renamed");
        let item = &cart.items()[0];
        assert_eq!(item.unit_price, usd(4600));
        assert_eq!(item.name, "special cleansing gel");
    }

    #[test]
    fn test_sizes_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(&gel(), "1.7 oz", usd(3200), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_price().amount, Decimal::new(7800, 2));
        assert!(cart.contains_product(&gel()));
    }

    #[test]
    fn test_empty_size_is_standard() {
        let mut cart = Cart::new();
        let cream = ProductSlug::new("calm-water-gel");
        cart.add(&cream, "", usd(5200), "calm water gel");
        assert_eq!(cart.items()[0].size, STANDARD_SIZE);
        assert_eq!(cart.quantity_of(&cream, STANDARD_SIZE), 1);
        cart.remove(&cream, "");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = Cart::new();
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        cart.remove(&gel(), "5.1 oz");
        assert_eq!(cart.quantity_of(&gel(), "5.1 oz"), 1);
        cart.remove(&gel(), "5.1 oz");
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_remove_only_touches_matching_size() {
        let mut cart = Cart::new();
        cart.add(&gel(), "1.7 oz", usd(3200), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");

        cart.remove(&gel(), "1.7 oz");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(&gel(), "5.1 oz"), 2);

        cart.remove(&gel(), "5.1 oz");
        assert_eq!(cart.quantity_of(&gel(), "5.1 oz"), 1);
        assert_eq!(cart.total_price(), usd(4600));
    }

    #[test]
    fn test_total_saturates_on_huge_prices() {
        let mut cart = Cart::new();
        let huge = Price::usd(Decimal::MAX);
        cart.add(&gel(), "5.1 oz", huge, "special cleansing gel");
        cart.add(&gel(), "5.1 oz", huge, "special cleansing gel");
        cart.add(&gel(), "1.7 oz", huge, "special cleansing gel");
        assert_eq!(cart.total_price().amount, Decimal::MAX);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&gel(), "5.1 oz", usd(4600), "special cleansing gel");
        let before = cart.clone();
        cart.remove(&gel(), "1.7 oz");
        cart.remove(&ProductSlug::new("nothing"), "5.1 oz");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut cart = Cart::new();
        cart.add(&gel(), "1.7 oz", usd(3200), "special cleansing gel");
        cart.add(&ProductSlug::new("daily-microfoliant"), "2.6 oz", usd(6700), "daily microfoliant");
        for size in ["1.7 oz", "5.1 oz"] {
            let before = cart.clone();
            cart.add(&gel(), size, usd(4600), "special cleansing gel");
            cart.remove(&gel(), size);
            assert_eq!(cart, before);
        }
    }
}
