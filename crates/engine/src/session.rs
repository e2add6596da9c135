//! Per-visit routine session.
//!
//! A [`RoutineSession`] holds everything the results page mutates: the quiz
//! profile, the displayed timing, the active tier tab, per-product size
//! selections and the cart. Derived data (per-tier routines and upgrade
//! products) is rebuilt whenever the profile or timing changes and is never
//! edited in place.

use std::collections::HashMap;

use serde::Serialize;
use skin_routine_core::{Email, Price, ProductSlug, Tier, Timing};
use tracing::{debug, error, info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::SizeOption;
use crate::commerce::{CartLineSubmission, CartReceipt, CommerceBackend, CommerceError};
use crate::dataset::RoutineDataset;
use crate::error::EngineError;
use crate::kits::Kit;
use crate::profile::UserProfile;
use crate::resolver::{self, ResolvedStep};
use crate::snapshot::RoutineSnapshot;
use crate::upgrade;

/// The active tier moved up because every upgrade product is now in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierAdvance {
    pub from: Tier,
    pub to: Tier,
}

/// Result of "add all to cart".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddAllOutcome {
    /// Lines added (products already in the cart at their selected size are skipped).
    pub added: usize,
    pub advances: Vec<TierAdvance>,
}

/// Count and base-price total of a tier's displayed routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineSummary {
    pub tier: Tier,
    pub timing: Timing,
    pub product_count: usize,
    pub total: Price,
}

#[derive(Debug, Clone, Default)]
struct PerTier<T> {
    essential: T,
    enhanced: T,
    comprehensive: T,
}

impl<T> PerTier<T> {
    fn build(mut f: impl FnMut(Tier) -> T) -> Self {
        Self {
            essential: f(Tier::Essential),
            enhanced: f(Tier::Enhanced),
            comprehensive: f(Tier::Comprehensive),
        }
    }

    const fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Essential => &self.essential,
            Tier::Enhanced => &self.enhanced,
            Tier::Comprehensive => &self.comprehensive,
        }
    }
}

/// Session state for one customer's results page.
#[derive(Debug, Clone)]
pub struct RoutineSession<'d> {
    dataset: &'d RoutineDataset,
    profile: UserProfile,
    selected_timing: Timing,
    active_tier: Tier,
    routines: PerTier<Vec<ResolvedStep>>,
    upgrades: PerTier<Vec<ProductSlug>>,
    selected_sizes: HashMap<ProductSlug, String>,
    cart: Cart,
}

impl<'d> RoutineSession<'d> {
    /// Start a session: resolve all three tiers and compute upgrades.
    ///
    /// The active tier starts at the profile's tier; `Both` displays AM first.
    #[must_use]
    pub fn new(dataset: &'d RoutineDataset, profile: UserProfile) -> Self {
        let mut session = Self {
            dataset,
            selected_timing: profile.timing.initial_display(),
            active_tier: profile.tier,
            profile,
            routines: PerTier::default(),
            upgrades: PerTier::default(),
            selected_sizes: HashMap::new(),
            cart: Cart::new(),
        };
        session.rebuild_routines();
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn dataset(&self) -> &'d RoutineDataset {
        self.dataset
    }

    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[must_use]
    pub const fn selected_timing(&self) -> Timing {
        self.selected_timing
    }

    #[must_use]
    pub const fn active_tier(&self) -> Tier {
        self.active_tier
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Routine display
    // =========================================================================

    /// Replace the profile (quiz retaken). The cart and size selections survive.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.selected_timing = profile.timing.initial_display();
        self.active_tier = profile.tier;
        self.profile = profile;
        self.rebuild_routines();
    }

    /// Show AM or PM steps. Ignored when the profile excludes that timing.
    ///
    /// Returns `true` if the displayed timing is now `timing`.
    pub fn switch_timing(&mut self, timing: Timing) -> bool {
        if !self.profile.timing.includes(timing) {
            debug!(%timing, preference = %self.profile.timing, "Ignoring timing switch");
            return false;
        }
        if self.selected_timing != timing {
            self.selected_timing = timing;
            self.rebuild_upgrades();
        }
        true
    }

    /// Make `tier` the active tab.
    pub const fn switch_tier(&mut self, tier: Tier) {
        self.active_tier = tier;
    }

    /// Every resolved step of `tier`, in matrix order and across both timings
    /// when the preference is `Both`.
    #[must_use]
    pub fn routine(&self, tier: Tier) -> &[ResolvedStep] {
        self.routines.get(tier)
    }

    /// Steps of `tier` at the selected timing, sorted by step.
    #[must_use]
    pub fn displayed_routine(&self, tier: Tier) -> Vec<&ResolvedStep> {
        resolver::display_order(self.routines.get(tier), Some(self.selected_timing))
    }

    /// Whether every tier has both AM and PM steps (the timing toggle is shown).
    #[must_use]
    pub fn has_both_timings(&self) -> bool {
        Tier::ALL.iter().all(|&tier| {
            let steps = self.routines.get(tier);
            steps.iter().any(|s| s.timing() == Timing::AM)
                && steps.iter().any(|s| s.timing() == Timing::PM)
        })
    }

    #[must_use]
    pub fn routine_summary(&self, tier: Tier) -> RoutineSummary {
        let shown = self.displayed_routine(tier);
        RoutineSummary {
            tier,
            timing: self.selected_timing,
            product_count: shown.len(),
            total: resolver::total_price(shown),
        }
    }

    /// Upgrade product slugs for `tier` (empty for the top tier).
    #[must_use]
    pub fn upgrade_products(&self, tier: Tier) -> &[ProductSlug] {
        self.upgrades.get(tier)
    }

    /// Next-tier steps for the upgrade section of `tier`, sorted by step.
    #[must_use]
    pub fn upgrade_entries(&self, tier: Tier) -> Vec<&ResolvedStep> {
        let Some(next) = tier.next() else {
            return Vec::new();
        };
        upgrade::upgrade_entries(
            &self.displayed_routine(next),
            self.upgrades.get(tier),
            self.selected_timing,
        )
    }

    fn rebuild_routines(&mut self) {
        let dataset = self.dataset;
        let profile = &self.profile;
        self.routines = PerTier::build(|tier| {
            let steps = resolver::resolve(dataset, &profile.with_tier(tier));
            resolver::check_expected_count(tier, profile.timing, steps.len());
            steps
        });
        self.rebuild_upgrades();
    }

    fn rebuild_upgrades(&mut self) {
        let timing = Some(self.selected_timing);
        let routines = &self.routines;
        self.upgrades = PerTier::build(|tier| {
            tier.next().map_or_else(Vec::new, |next| {
                upgrade::diff(
                    resolver::display_order(routines.get(tier), timing),
                    resolver::display_order(routines.get(next), timing),
                )
            })
        });
    }

    // =========================================================================
    // Sizes
    // =========================================================================

    /// The size currently selected for a product: the last [`select_size`]
    /// choice, else the product's default size.
    ///
    /// [`select_size`]: RoutineSession::select_size
    #[must_use]
    pub fn selected_size(&self, product: &ProductSlug) -> SizeOption {
        let name = self.product_name(product);
        let sizes = self.dataset.catalog.sizes_for(&name);
        self.selected_sizes
            .get(product)
            .and_then(|size| sizes.iter().find(|option| &option.size == size).cloned())
            .unwrap_or_else(|| self.dataset.catalog.default_size(&name))
    }

    /// Select a size for a product. Unknown sizes are ignored.
    ///
    /// Returns the newly selected option.
    pub fn select_size(&mut self, product: &ProductSlug, size: &str) -> Option<SizeOption> {
        let name = self.product_name(product);
        let option = self
            .dataset
            .catalog
            .sizes_for(&name)
            .into_iter()
            .find(|option| option.size == size)?;
        self.selected_sizes
            .insert(product.clone(), option.size.clone());
        Some(option)
    }

    /// Whether the product's selected size is already in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product: &ProductSlug) -> bool {
        self.cart
            .quantity_of(product, &self.selected_size(product).size)
            > 0
    }

    /// Catalog name for a slug, or the slug itself when unknown.
    fn product_name(&self, product: &ProductSlug) -> String {
        self.dataset
            .catalog
            .find_by_slug(product)
            .map_or_else(|| product.to_string(), |p| p.name.clone())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit and check whether the active tier should advance.
    pub fn add_to_cart(
        &mut self,
        product: &ProductSlug,
        size: &str,
        unit_price: Price,
        name: &str,
    ) -> Option<TierAdvance> {
        self.cart.add(product, size, unit_price, name);
        debug!(
            product = %product,
            size,
            items = self.cart.item_count(),
            total = %self.cart.total_price(),
            "Added to cart"
        );
        self.check_tier_advance()
    }

    /// Add a catalog product at `size`, or at its selected size when `None`.
    ///
    /// Price and display name come from the catalog; unknown products are
    /// added at zero with a name rebuilt from the slug.
    pub fn add_product(&mut self, product: &ProductSlug, size: Option<&str>) -> Option<TierAdvance> {
        let name = self.product_name(product);
        let size = size.map_or_else(|| self.selected_size(product).size, str::to_string);
        let price = self.dataset.catalog.price_for(&name, &size);
        let display_name = self.dataset.catalog.display_name(product);
        self.add_to_cart(product, &size, price, &display_name)
    }

    /// Add every displayed product of `tier` not already in the cart at its
    /// selected size.
    #[instrument(skip(self))]
    pub fn add_all(&mut self, tier: Tier) -> AddAllOutcome {
        let pending: Vec<ProductSlug> = self
            .displayed_routine(tier)
            .into_iter()
            .map(ResolvedStep::slug)
            .filter(|slug| !self.is_in_cart(slug))
            .collect();

        let mut outcome = AddAllOutcome::default();
        for slug in pending {
            // The same product can appear twice in a routine
            if self.is_in_cart(&slug) {
                continue;
            }
            outcome.advances.extend(self.add_product(&slug, None));
            outcome.added += 1;
        }
        info!(added = outcome.added, "Added routine to cart");
        outcome
    }

    /// Add a curated kit at its kit price.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownKit`] (leaving the cart alone) if the
    /// dataset has no kit with this slug.
    pub fn add_kit(&mut self, slug: &ProductSlug) -> Result<Option<TierAdvance>, EngineError> {
        let Some(Kit { slug, name, price, .. }) = self.dataset.kit(slug).cloned() else {
            warn!(kit = %slug, "Unknown kit");
            return Err(EngineError::UnknownKit(slug.to_string()));
        };
        Ok(self.add_to_cart(&slug, "", price, &name))
    }

    /// Remove one unit of `(product, size)`. Unknown lines are ignored.
    pub fn remove_from_cart(&mut self, product: &ProductSlug, size: &str) {
        self.cart.remove(product, size);
        debug!(product = %product, size, items = self.cart.item_count(), "Removed from cart");
    }

    /// Advance the active tier when every upgrade product for it is in the cart
    /// (any size).
    fn check_tier_advance(&mut self) -> Option<TierAdvance> {
        let upgrades = self.upgrades.get(self.active_tier);
        if upgrades.is_empty() || !upgrades.iter().all(|slug| self.cart.contains_product(slug)) {
            return None;
        }
        let from = self.active_tier;
        let to = from.next()?;
        self.active_tier = to;
        info!(from = %from, to = %to, "All upgrade products in cart, advancing tier");
        Some(TierAdvance { from, to })
    }

    // =========================================================================
    // Save & checkout
    // =========================================================================

    /// Snapshot of the active tier's displayed routine.
    #[must_use]
    pub fn snapshot(&self, email: Email) -> RoutineSnapshot {
        RoutineSnapshot::new(
            email,
            self.profile.clone(),
            self.active_tier,
            self.selected_timing,
            self.displayed_routine(self.active_tier),
        )
    }

    /// The cart as backend submission lines.
    #[must_use]
    pub fn submission_lines(&self) -> Vec<CartLineSubmission> {
        CartLineSubmission::from_cart(&self.cart, &self.dataset.catalog)
    }

    /// Submit the cart once.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::EmptyCart` for an empty cart, otherwise
    /// whatever the backend returns.
    pub async fn submit_cart<B: CommerceBackend>(
        &self,
        backend: &B,
    ) -> Result<CartReceipt, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        backend.submit(&self.submission_lines()).await
    }

    /// Submit the cart once and report only success or failure.
    pub async fn checkout<B: CommerceBackend>(&self, backend: &B) -> bool {
        match self.submit_cart(backend).await {
            Ok(receipt) => {
                info!(
                    cart_id = %receipt.cart_id,
                    quantity = receipt.total_quantity,
                    "Checkout submitted"
                );
                true
            }
            Err(e) => {
                error!(error = %e, "Checkout failed");
                false
            }
        }
    }
}
