//! Results-page sessions: cart reconciliation, tier advancement, save and checkout.

#![allow(clippy::unwrap_used)]

use skin_routine_core::{CurrencyCode, Email, Price, ProductSlug, Tier, Timing, TimingPreference};
use skin_routine_engine::{
    CartLineSubmission, CommerceError, RoutineDataset, RoutineSession, TierAdvance,
};
use skin_routine_integration_tests::{RecordingBackend, RejectingBackend, biolumin_profile};

fn slug(s: &str) -> ProductSlug {
    ProductSlug::new(s)
}

fn slugs(list: &[ProductSlug]) -> Vec<&str> {
    list.iter().map(ProductSlug::as_str).collect()
}

#[test]
fn test_upgrades_follow_the_displayed_timing() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::Both));

    assert_eq!(
        slugs(session.upgrade_products(Tier::Essential)),
        vec!["precleanse-cleansing-oil", "daily-glycolic-cleanser"]
    );

    assert!(session.switch_timing(Timing::PM));
    assert_eq!(
        slugs(session.upgrade_products(Tier::Essential)),
        vec!["precleanse-cleansing-oil", "biolumin-c-night-restore"]
    );
    assert_eq!(
        slugs(session.upgrade_products(Tier::Enhanced)),
        vec!["antioxidant-hydramist", "biolumin-c-vitamin-c-eye-serum"]
    );
}

#[test]
fn test_timing_switch_ignored_outside_preference() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));

    assert!(!session.switch_timing(Timing::PM));
    assert_eq!(session.selected_timing(), Timing::AM);
    assert!(session.switch_timing(Timing::AM));
}

#[test]
fn test_tier_advances_through_every_tier() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::PM));
    assert_eq!(session.selected_timing(), Timing::PM);

    let mut advances = Vec::new();
    advances.extend(session.add_product(&slug("precleanse-cleansing-oil"), None));
    assert!(advances.is_empty());
    advances.extend(session.add_product(&slug("biolumin-c-night-restore"), None));
    assert_eq!(session.active_tier(), Tier::Enhanced);

    advances.extend(session.add_product(&slug("antioxidant-hydramist"), None));
    advances.extend(session.add_product(&slug("biolumin-c-vitamin-c-eye-serum"), None));
    assert_eq!(session.active_tier(), Tier::Comprehensive);

    assert_eq!(
        advances,
        vec![
            TierAdvance {
                from: Tier::Essential,
                to: Tier::Enhanced,
            },
            TierAdvance {
                from: Tier::Enhanced,
                to: Tier::Comprehensive,
            },
        ]
    );

    // Top tier has nothing left to suggest
    assert!(session.upgrade_products(Tier::Comprehensive).is_empty());
    assert_eq!(session.add_product(&slug("special-cleansing-gel"), None), None);
}

#[test]
fn test_removing_an_upgrade_does_not_demote() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));

    session.add_product(&slug("precleanse-cleansing-oil"), Some("1.7 oz"));
    session.add_product(&slug("daily-glycolic-cleanser"), None);
    assert_eq!(session.active_tier(), Tier::Enhanced);

    session.remove_from_cart(&slug("precleanse-cleansing-oil"), "1.7 oz");
    assert!(!session.cart().contains_product(&slug("precleanse-cleansing-oil")));
    assert_eq!(session.active_tier(), Tier::Enhanced);
}

#[test]
fn test_add_all_respects_selected_sizes() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));
    let gel = slug("special-cleansing-gel");

    // The full size is in the cart, but the 1.7 oz is selected
    session.add_product(&gel, Some("5.1 oz"));
    session.select_size(&gel, "1.7 oz").unwrap();
    assert!(!session.is_in_cart(&gel));

    let outcome = session.add_all(Tier::Essential);
    assert_eq!(outcome.added, 3);
    assert_eq!(session.cart().quantity_of(&gel, "1.7 oz"), 1);
    assert_eq!(session.cart().quantity_of(&gel, "5.1 oz"), 1);
    // 46 + 32 + 67 + 85
    assert_eq!(
        session.cart().total_price(),
        Price::from_cents(23000, CurrencyCode::USD)
    );
}

#[test]
fn test_cart_survives_retaking_the_quiz() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));
    session.add_kit(&slug("daily-brightness-boosters-kit")).unwrap();

    let retaken = biolumin_profile(TimingPreference::PM).with_tier(Tier::Enhanced);
    session.set_profile(retaken);

    assert_eq!(session.active_tier(), Tier::Enhanced);
    assert_eq!(session.selected_timing(), Timing::PM);
    assert_eq!(session.cart().item_count(), 1);
    assert_eq!(
        session.cart().total_price(),
        Price::from_cents(4950, CurrencyCode::USD)
    );
}

#[test]
fn test_snapshot_json() {
    let dataset = RoutineDataset::embedded().unwrap();
    let session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::Both));
    let snapshot = session.snapshot(Email::parse("jane@example.com").unwrap());

    assert_eq!(snapshot.tier, Tier::Essential);
    assert_eq!(snapshot.timing, Timing::AM);
    assert_eq!(snapshot.products.len(), 3);
    assert_eq!(snapshot.total(), Price::from_cents(19800, CurrencyCode::USD));

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["email"], "jane@example.com");
    assert_eq!(json["tier"], "Essential");
    assert_eq!(json["products"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["products"][0]["slug"],
        "special-cleansing-gel"
    );
}

#[tokio::test]
async fn test_checkout_submits_every_line_once() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));
    let gel = slug("special-cleansing-gel");
    session.add_product(&gel, None);
    session.add_product(&gel, None);
    session.add_product(&gel, Some("1.7 oz"));
    session.add_kit(&slug("discover-healthy-skin-kit")).unwrap();

    let backend = RecordingBackend::new();
    let receipt = session.submit_cart(&backend).await.unwrap();
    assert_eq!(receipt.total_quantity, 4);

    let submissions = backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions.first().unwrap(),
        &vec![
            CartLineSubmission {
                merchandise_id: "special-cleansing-gel".to_string(),
                quantity: 2,
                size: "5.1 oz".to_string(),
            },
            CartLineSubmission {
                merchandise_id: "special-cleansing-gel".to_string(),
                quantity: 1,
                size: "1.7 oz".to_string(),
            },
            CartLineSubmission {
                merchandise_id: "discover-healthy-skin-kit".to_string(),
                quantity: 1,
                size: "Standard".to_string(),
            },
        ]
    );

    assert!(session.checkout(&backend).await);
    assert_eq!(backend.submissions().len(), 2);
}

#[tokio::test]
async fn test_checkout_failure_is_reported_not_retried() {
    let dataset = RoutineDataset::embedded().unwrap();
    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));
    session.add_all(Tier::Essential);

    let err = session.submit_cart(&RejectingBackend).await.unwrap_err();
    assert!(matches!(err, CommerceError::UserError(_)));
    assert!(!session.checkout(&RejectingBackend).await);

    // The cart is left intact for another attempt
    assert_eq!(session.cart().item_count(), 3);
}

#[tokio::test]
async fn test_empty_cart_never_reaches_backend() {
    let dataset = RoutineDataset::embedded().unwrap();
    let session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));

    let backend = RecordingBackend::new();
    assert!(matches!(
        session.submit_cart(&backend).await,
        Err(CommerceError::EmptyCart)
    ));
    assert!(backend.submissions().is_empty());
}

#[test]
fn test_cart_total_saturates_at_largest_price() {
    let dataset = RoutineDataset::from_json(
        r#"{"products":[{"name":"X","price":"79228162514264337593543950335"}],"routine_matrix":[]}"#,
    )
    .unwrap();
    assert_eq!(dataset.validate(), Vec::<String>::new());

    let mut session = RoutineSession::new(&dataset, biolumin_profile(TimingPreference::AM));
    session.add_product(&slug("x"), None);
    session.add_product(&slug("x"), None);

    assert_eq!(session.cart().item_count(), 2);
    // Already the largest representable amount, so doubling clamps to it
    let unit = dataset.catalog.price_for("X", "Standard");
    assert_eq!(session.cart().total_price(), unit);
    assert_eq!(unit.amount.to_string(), "79228162514264337593543950335");
}
