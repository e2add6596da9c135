//! Shape of the embedded dataset.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use skin_routine_core::{CurrencyCode, Price, ProductSlug, Tier, Timing};
use skin_routine_engine::{Franchise, RoutineDataset, STANDARD_SIZE};

#[test]
fn test_embedded_dataset_has_no_problems() {
    let dataset = RoutineDataset::embedded().unwrap();
    assert_eq!(dataset.validate(), Vec::<String>::new());
    assert!(dataset.validated().is_ok());
}

#[test]
fn test_matrix_covers_every_franchise_tier_and_timing() {
    let dataset = RoutineDataset::embedded().unwrap();
    assert_eq!(dataset.matrix.len(), 270);

    for franchise in Franchise::ALL {
        for tier in Tier::ALL {
            for timing in [Timing::AM, Timing::PM] {
                let rows: Vec<_> = dataset
                    .matrix
                    .rows_for(franchise, tier)
                    .filter(|row| row.timing == timing)
                    .collect();
                assert_eq!(
                    rows.len(),
                    tier.expected_step_count(),
                    "{franchise} {tier} {timing}"
                );

                let products: HashSet<&str> = rows.iter().map(|row| row.product.as_str()).collect();
                assert_eq!(products.len(), rows.len(), "{franchise} {tier} {timing} repeats a product");
            }
        }
    }
}

#[test]
fn test_every_matrix_product_is_in_catalog() {
    let dataset = RoutineDataset::embedded().unwrap();
    for row in dataset.matrix.iter() {
        assert!(dataset.catalog.contains(&row.product), "{}", row.product);
        if let Some(swap) = row.swap() {
            assert!(dataset.catalog.contains(swap), "{swap}");
        }
    }
}

#[test]
fn test_default_size_is_largest_listed() {
    let dataset = RoutineDataset::embedded().unwrap();
    let catalog = &dataset.catalog;

    let gel = catalog.default_size("Special Cleansing Gel");
    assert_eq!(gel.size, "5.1 oz");
    assert_eq!(gel.price, Price::from_cents(4600, CurrencyCode::USD));

    let microfoliant = catalog.sizes_for("Daily Microfoliant");
    assert_eq!(
        microfoliant.iter().map(|s| s.size.as_str()).collect::<Vec<_>>(),
        vec!["0.45 oz", "2.6 oz"]
    );
    assert_eq!(catalog.default_size("Daily Microfoliant").size, "2.6 oz");
}

#[test]
fn test_unknown_product_degrades_to_standard_size() {
    let dataset = RoutineDataset::embedded().unwrap();
    let sizes = dataset.catalog.sizes_for("Not A Real Product");
    assert_eq!(sizes.len(), 1);
    assert_eq!(sizes.first().unwrap().size, STANDARD_SIZE);
    assert!(sizes.first().unwrap().price.is_zero());
    assert!(
        dataset
            .catalog
            .price_for("Not A Real Product", "5.1 oz")
            .is_zero()
    );
}

#[test]
fn test_kits() {
    let dataset = RoutineDataset::embedded().unwrap();
    assert_eq!(dataset.kits.len(), 2);

    let kit = dataset
        .kit(&ProductSlug::new("discover-healthy-skin-kit"))
        .unwrap();
    assert_eq!(kit.price, Price::from_cents(3950, CurrencyCode::USD));
    assert_eq!(kit.retail_price, Price::from_cents(5900, CurrencyCode::USD));
    assert_eq!(kit.savings(), Price::from_cents(1950, CurrencyCode::USD));
    assert_eq!(kit.label, "Great For Gifting");

    assert!(dataset.kit(&ProductSlug::new("no-such-kit")).is_none());
}

#[test]
fn test_every_product_is_reachable_by_slug() {
    let dataset = RoutineDataset::embedded().unwrap();
    for product in dataset.catalog.iter() {
        let found = dataset.catalog.find_by_slug(&product.slug()).unwrap();
        // Names differing only in case share a slug
        assert!(found.name.eq_ignore_ascii_case(&product.name), "{}", product.name);
    }
}
