//! Upgrade differ: which next-tier products to suggest as upsells.

use std::collections::HashSet;

use skin_routine_core::{ProductSlug, Timing};

use crate::resolver::ResolvedStep;

/// Upper bound on suggested upgrade products per tier.
pub const MAX_UPGRADE_PRODUCTS: usize = 2;

/// Products in `next` that are absent from `current`, as slugs.
///
/// Both routines must already be filtered to the displayed timing. Survivors
/// are deduplicated by product name (first occurrence wins), stably sorted by
/// step, and truncated to [`MAX_UPGRADE_PRODUCTS`].
pub fn diff<'a, C, N>(current: C, next: N) -> Vec<ProductSlug>
where
    C: IntoIterator<Item = &'a ResolvedStep>,
    N: IntoIterator<Item = &'a ResolvedStep>,
{
    let current_names: HashSet<&str> = current.into_iter().map(ResolvedStep::product_name).collect();

    let mut seen = HashSet::new();
    let mut upgrades: Vec<&ResolvedStep> = next
        .into_iter()
        .filter(|step| !current_names.contains(step.product_name()))
        .filter(|step| seen.insert(step.product_name()))
        .collect();

    upgrades.sort_by_key(|step| step.step());
    upgrades.truncate(MAX_UPGRADE_PRODUCTS);

    upgrades.into_iter().map(ResolvedStep::slug).collect()
}

/// Resolve upgrade slugs back to next-tier steps for display.
///
/// A step at the `selected` timing is preferred when a product appears at
/// both timings. Slugs with no matching step are dropped. Result is sorted
/// by step.
#[must_use]
pub fn upgrade_entries<'a>(
    next: &[&'a ResolvedStep],
    slugs: &[ProductSlug],
    selected: Timing,
) -> Vec<&'a ResolvedStep> {
    let mut entries: Vec<&ResolvedStep> = slugs
        .iter()
        .filter_map(|slug| {
            let matches = |s: &&&ResolvedStep| slug.matches_name(s.product_name());
            next.iter()
                .find(|s| matches(s) && s.timing() == selected)
                .or_else(|| next.iter().find(matches))
                .copied()
        })
        .collect();
    entries.sort_by_key(|step| step.step());
    entries
}
