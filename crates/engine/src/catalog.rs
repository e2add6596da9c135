//! Product catalog: names, base prices, sizes and descriptive metadata.
//!
//! The catalog is static reference data. It is loaded once with the dataset
//! and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use skin_routine_core::{CurrencyCode, Price, ProductSlug};

/// Label used when a product has no explicit size list.
pub const STANDARD_SIZE: &str = "Standard";

/// One purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    /// Size label as shown to customers (e.g. "5.1 oz").
    pub size: String,
    /// Price for this size.
    #[serde(with = "usd_amount")]
    pub price: Price,
    /// Shopify product variant GID, when the dataset knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

impl SizeOption {
    /// The synthesized single size used for products without explicit sizes.
    #[must_use]
    pub fn standard(price: Price) -> Self {
        Self {
            size: STANDARD_SIZE.to_string(),
            price,
            variant_id: None,
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product name, used as the key by the routine matrix.
    pub name: String,
    /// Base price, used when the product has no explicit sizes.
    #[serde(with = "usd_amount")]
    pub price: Price,
    /// Routine category (Cleanse, Exfoliate, Treat, ...).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Sizes, authored smallest to largest.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<SizeOption>,
}

impl Product {
    #[must_use]
    pub fn slug(&self) -> ProductSlug {
        ProductSlug::from_name(&self.name)
    }
}

/// Descriptive attributes joined onto a routine step.
///
/// A step whose product is missing from the catalog gets the default (empty)
/// value instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    pub price: Option<Price>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<&Product> for ProductDetails {
    fn from(product: &Product) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            price: Some(product.price),
            category: non_empty(&product.category),
            description: non_empty(&product.description),
            image: non_empty(&product.image),
        }
    }
}

/// Indexed collection of products, preserving dataset order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog. A later product with the same name replaces the
    /// earlier one in lookups.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let by_name = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self { products, by_name }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).and_then(|&i| self.products.get(i))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Products in dataset order, including shadowed duplicates.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Details for a product, or an empty set if it is unknown.
    #[must_use]
    pub fn details(&self, name: &str) -> ProductDetails {
        self.get(name).map(ProductDetails::from).unwrap_or_default()
    }

    /// Sizes for a product in table order.
    ///
    /// Products without explicit sizes get a single synthesized
    /// [`STANDARD_SIZE`] entry at their base price (zero if the product is
    /// unknown).
    #[must_use]
    pub fn sizes_for(&self, name: &str) -> Vec<SizeOption> {
        match self.get(name) {
            Some(product) if !product.sizes.is_empty() => product.sizes.clone(),
            Some(product) => vec![SizeOption::standard(product.price)],
            None => vec![SizeOption::standard(Price::zero(CurrencyCode::USD))],
        }
    }

    /// The default size for a product: the last entry of [`Catalog::sizes_for`].
    ///
    /// Sizes are authored smallest to largest, so this is the full-size
    /// product.
    #[must_use]
    pub fn default_size(&self, name: &str) -> SizeOption {
        self.sizes_for(name)
            .pop()
            .unwrap_or_else(|| SizeOption::standard(Price::zero(CurrencyCode::USD)))
    }

    /// Price of `name` at `size`, falling back to the base price, then zero.
    #[must_use]
    pub fn price_for(&self, name: &str, size: &str) -> Price {
        let Some(product) = self.get(name) else {
            return Price::zero(CurrencyCode::USD);
        };
        product
            .sizes
            .iter()
            .find(|option| option.size == size)
            .map_or(product.price, |option| option.price)
    }

    /// Find the product whose name slugifies to `slug`.
    #[must_use]
    pub fn find_by_slug(&self, slug: &ProductSlug) -> Option<&Product> {
        self.products.iter().find(|p| slug.matches_name(&p.name))
    }

    /// Lower-cased catalog name for a slug, or a name rebuilt from the slug.
    #[must_use]
    pub fn display_name(&self, slug: &ProductSlug) -> String {
        self.find_by_slug(slug).map_or_else(
            || slug.fallback_display_name(),
            |product| product.name.to_lowercase(),
        )
    }
}

/// Serialize a [`Price`] as its bare decimal amount (dataset prices are USD).
pub(crate) mod usd_amount {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use skin_routine_core::Price;

    pub fn serialize<S: Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&price.amount, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Price::usd)
    }
}
