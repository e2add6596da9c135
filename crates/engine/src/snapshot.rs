//! "Save my results" snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skin_routine_core::{Email, Price, ProductSlug, Tier, Timing};
use uuid::Uuid;

use crate::profile::UserProfile;
use crate::resolver::ResolvedStep;

/// One displayed product at the time of saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotProduct {
    pub step: u32,
    pub timing: Timing,
    pub name: String,
    pub slug: ProductSlug,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&ResolvedStep> for SnapshotProduct {
    fn from(step: &ResolvedStep) -> Self {
        Self {
            step: step.step(),
            timing: step.timing(),
            name: step.product_name().to_string(),
            slug: step.slug(),
            price: step.price(),
            category: step.details.category.clone(),
        }
    }
}

/// The routine a customer asked to have emailed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub email: Email,
    pub profile: UserProfile,
    /// Tier tab that was active when saving.
    pub tier: Tier,
    /// Timing that was displayed when saving.
    pub timing: Timing,
    pub products: Vec<SnapshotProduct>,
}

impl RoutineSnapshot {
    #[must_use]
    pub fn new<'a>(
        email: Email,
        profile: UserProfile,
        tier: Tier,
        timing: Timing,
        steps: impl IntoIterator<Item = &'a ResolvedStep>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            email,
            profile,
            tier,
            timing,
            products: steps.into_iter().map(SnapshotProduct::from).collect(),
        }
    }

    /// Sum of the saved products' base prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.products.iter().map(|p| p.price).sum()
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use skin_routine_core::TimingPreference;

    use super::*;
    use crate::dataset::RoutineDataset;
    use crate::profile::Concern;
    use crate::resolver::{display_order, resolve};

    fn profile() -> UserProfile {
        UserProfile {
            age: 28,
            concern: Concern::DullnessUnevenTone,
            tier: Tier::Essential,
            timing: TimingPreference::AM,
            sensitive: false,
        }
    }

    #[test]
    fn test_snapshot_captures_displayed_products() {
        let dataset = RoutineDataset::embedded().unwrap();
        let steps = resolve(&dataset, &profile());
        let shown = display_order(&steps, Some(Timing::AM));
        let email = Email::parse("jane@example.com").unwrap();

        let snapshot = RoutineSnapshot::new(email, profile(), Tier::Essential, Timing::AM, shown);

        assert_eq!(snapshot.products.len(), 3);
        assert_eq!(snapshot.products[0].slug.as_str(), "special-cleansing-gel");
        assert_eq!(snapshot.products[0].category.as_deref(), Some("Cleanse"));
        assert_eq!(snapshot.total().amount, Decimal::new(19800, 2));
    }

    #[test]
    fn test_snapshot_json_round_trips() {
        let email = Email::parse("jane@example.com").unwrap();
        let snapshot = RoutineSnapshot::new(email, profile(), Tier::Enhanced, Timing::PM, Vec::<&ResolvedStep>::new());
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"email\": \"jane@example.com\""));
        assert!(json.contains("\"concern\": \"Dullness / uneven tone\""));
        let parsed: RoutineSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(parsed.total().is_zero());
    }
}
