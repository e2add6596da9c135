//! Recommendation resolver: quiz profile to routine steps.
//!
//! Resolution is a pure lookup over the dataset:
//!
//! 1. Pick the franchise for the profile's concern (and age, for acne)
//! 2. Take the matrix rows for that franchise and the profile's tier
//! 3. Apply sensitive swaps row by row when the profile is sensitive
//! 4. Keep only rows matching the timing preference (`Both` keeps all)
//! 5. Join each row with its catalog details
//!
//! Output is in matrix order. Callers sort by step before display (see
//! [`display_order`]). With `Both`, AM and PM steps are numbered
//! independently, so the result contains two step 1s.

use serde::Serialize;
use skin_routine_core::{CurrencyCode, Price, ProductSlug, Tier, Timing, TimingPreference};
use tracing::{debug, warn};

use crate::catalog::ProductDetails;
use crate::dataset::RoutineDataset;
use crate::matrix::RoutineMatrixEntry;
use crate::profile::UserProfile;

/// A matrix row after sensitive swapping, joined with its product details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStep {
    /// The row, with `product` already swapped when applicable.
    pub entry: RoutineMatrixEntry,
    /// Catalog details for `entry.product`; empty if the product is unknown.
    pub details: ProductDetails,
}

impl ResolvedStep {
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.entry.product
    }

    #[must_use]
    pub fn slug(&self) -> ProductSlug {
        ProductSlug::from_name(&self.entry.product)
    }

    #[must_use]
    pub const fn timing(&self) -> Timing {
        self.entry.timing
    }

    #[must_use]
    pub const fn step(&self) -> u32 {
        self.entry.step
    }

    /// Base price, zero when the product has no catalog entry.
    #[must_use]
    pub fn price(&self) -> Price {
        self.details
            .price
            .unwrap_or_else(|| Price::zero(CurrencyCode::USD))
    }
}

/// Resolve a profile to its routine steps, in matrix order.
#[must_use]
pub fn resolve(dataset: &RoutineDataset, profile: &UserProfile) -> Vec<ResolvedStep> {
    let franchise = profile.franchise();

    let steps: Vec<ResolvedStep> = dataset
        .matrix
        .rows_for(franchise, profile.tier)
        .map(|row| {
            if profile.sensitive {
                row.with_sensitive_swap()
            } else {
                row.clone()
            }
        })
        .filter(|row| profile.timing.includes(row.timing))
        .map(|entry| ResolvedStep {
            details: dataset.catalog.details(&entry.product),
            entry,
        })
        .collect();

    debug!(
        franchise = %franchise,
        tier = %profile.tier,
        timing = %profile.timing,
        sensitive = profile.sensitive,
        steps = steps.len(),
        "Resolved routine"
    );

    steps
}

/// Steps to display for one timing (or all, for `None`), stably sorted by step.
#[must_use]
pub fn display_order(steps: &[ResolvedStep], timing: Option<Timing>) -> Vec<&ResolvedStep> {
    let mut shown: Vec<&ResolvedStep> = steps
        .iter()
        .filter(|s| timing.is_none_or(|t| s.timing() == t))
        .collect();
    shown.sort_by_key(|s| s.step());
    shown
}

/// How many steps a resolved routine should contain.
#[must_use]
pub const fn expected_count(tier: Tier, timing: TimingPreference) -> usize {
    match timing {
        TimingPreference::Both => tier.expected_step_count() * 2,
        TimingPreference::AM | TimingPreference::PM => tier.expected_step_count(),
    }
}

/// Log a warning when a routine has an unexpected number of steps.
///
/// A mismatch never blocks display; returns `true` when the count is as expected.
pub fn check_expected_count(tier: Tier, timing: TimingPreference, actual: usize) -> bool {
    let expected = expected_count(tier, timing);
    if actual != expected {
        warn!(
            tier = %tier,
            timing = %timing,
            expected,
            actual,
            "Routine has unexpected number of products"
        );
    }
    actual == expected
}

/// Sum of base prices of the given steps.
pub fn total_price<'a>(steps: impl IntoIterator<Item = &'a ResolvedStep>) -> Price {
    steps.into_iter().map(ResolvedStep::price).sum()
}
