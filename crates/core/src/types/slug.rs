//! URL-safe product keys.
//!
//! Cart lines, upgrade suggestions and kit entries are all keyed by the slug
//! of the product name rather than the name itself, so that
//! `"Special Cleansing Gel"` and `"special cleansing gel"` refer to the same
//! product.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product key derived from a product name.
///
/// ## Examples
///
/// ```
/// use skin_routine_core::ProductSlug;
///
/// let slug = ProductSlug::from_name("BioLumin-C Heat Aging Protector SPF50");
/// assert_eq!(slug.as_str(), "biolumin-c-heat-aging-protector-spf50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSlug(String);

impl ProductSlug {
    /// Slugify a product name: lowercase, every run of characters outside
    /// `[a-z0-9]` collapsed to a single `-`, leading and trailing `-` removed.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;

        for c in name.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            } else {
                pending_dash = true;
            }
        }

        Self(slug)
    }

    /// Wrap a value that is already a slug (e.g. a kit handle from the dataset).
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `name` slugifies to this slug.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        Self::from_name(name) == *self
    }

    /// Fallback display name when no catalog entry is known: hyphens become
    /// spaces and the result is lower-cased.
    #[must_use]
    pub fn fallback_display_name(&self) -> String {
        self.0.replace('-', " ").to_lowercase()
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductSlug {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_basic() {
        assert_eq!(
            ProductSlug::from_name("Special Cleansing Gel").as_str(),
            "special-cleansing-gel"
        );
    }

    #[test]
    fn test_from_name_collapses_punctuation() {
        assert_eq!(
            ProductSlug::from_name("Magnetic[+] Afterglow Cleanser").as_str(),
            "magnetic-afterglow-cleanser"
        );
        assert_eq!(
            ProductSlug::from_name("  Multi-Active   Toner!! ").as_str(),
            "multi-active-toner"
        );
    }

    #[test]
    fn test_from_name_drops_non_ascii() {
        assert_eq!(
            ProductSlug::from_name("Phyto Nature E² Regenerating").as_str(),
            "phyto-nature-e-regenerating"
        );
    }

    #[test]
    fn test_from_name_empty() {
        assert_eq!(ProductSlug::from_name("").as_str(), "");
        assert_eq!(ProductSlug::from_name("---").as_str(), "");
    }

    #[test]
    fn test_matches_name_is_case_insensitive() {
        let slug = ProductSlug::new("stabilizing-repair-cream");
        assert!(slug.matches_name("Stabilizing Repair Cream"));
        assert!(slug.matches_name("stabilizing repair cream"));
        assert!(!slug.matches_name("Stabilizing Repair"));
    }

    #[test]
    fn test_fallback_display_name() {
        let slug = ProductSlug::new("daily-milkfoliant");
        assert_eq!(slug.fallback_display_name(), "daily milkfoliant");
    }
}
