use fee_engine::errors::FeeError;
use fee_engine::pricing::{PricingTier, PricingTierResolver, Product};
use fee_engine::store::InMemoryStore;

fn tier(product_id: u64, min: u32, max: Option<u32>, price: f64) -> PricingTier {
    PricingTier {
        product_id,
        min_quantity: min,
        max_quantity: max,
        price_per_unit: price,
    }
}

/// Product 1: base $12, tiers 1-9 @ $10, 10-49 @ $8, 50+ @ $6.
fn wholesale_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.add_product(
        Product {
            id: 1,
            name: "Widget".to_string(),
            base_price: 12.0,
        },
        vec![
            tier(1, 1, Some(9), 10.0),
            tier(1, 10, Some(49), 8.0),
            tier(1, 50, None, 6.0),
        ],
    );
    store.add_product(
        Product {
            id: 2,
            name: "Untiered".to_string(),
            base_price: 20.0,
        },
        vec![],
    );
    store
}

#[test]
fn quantity_in_first_bracket_uses_that_tier_not_base() {
    let resolver = PricingTierResolver::new(wholesale_store());
    let pricing = resolver.price_for_quantity(1, 5).unwrap();
    assert_eq!(pricing.unit_price, 10.0);
    assert_eq!(pricing.tier, "1-9 units");
    assert_eq!(pricing.total_price, 50.0);
    // $2 under base per unit.
    assert_eq!(pricing.savings, 10.0);
}

#[test]
fn large_quantity_hits_unbounded_tier() {
    let resolver = PricingTierResolver::new(wholesale_store());
    let pricing = resolver.price_for_quantity(1, 75).unwrap();
    assert_eq!(pricing.unit_price, 6.0);
    assert_eq!(pricing.tier, "50+ units");
    assert_eq!(pricing.total_price, 450.0);
    assert_eq!(pricing.savings, 450.0);
}

#[test]
fn bracket_edges_match_inclusively() {
    let resolver = PricingTierResolver::new(wholesale_store());
    assert_eq!(resolver.price_for_quantity(1, 9).unwrap().unit_price, 10.0);
    assert_eq!(resolver.price_for_quantity(1, 10).unwrap().unit_price, 8.0);
    assert_eq!(resolver.price_for_quantity(1, 49).unwrap().unit_price, 8.0);
    assert_eq!(resolver.price_for_quantity(1, 50).unwrap().unit_price, 6.0);
}

#[test]
fn no_tiers_falls_back_to_base_price() {
    let resolver = PricingTierResolver::new(wholesale_store());
    let pricing = resolver.price_for_quantity(2, 3).unwrap();
    assert_eq!(pricing.unit_price, 20.0);
    assert_eq!(pricing.tier, "Base");
    assert_eq!(pricing.total_price, 60.0);
    assert_eq!(pricing.savings, 0.0);
}

#[test]
fn unknown_product_fails() {
    let resolver = PricingTierResolver::new(wholesale_store());
    assert!(matches!(
        resolver.price_for_quantity(999, 1),
        Err(FeeError::ProductNotFound { product_id: 999 })
    ));
}

#[test]
fn negative_savings_are_preserved() {
    let mut store = InMemoryStore::new();
    // Surcharge tier above base price, e.g. below-minimum order quantities.
    store.add_product(
        Product {
            id: 3,
            name: "Surcharged".to_string(),
            base_price: 5.0,
        },
        vec![tier(3, 1, Some(4), 6.0)],
    );
    let resolver = PricingTierResolver::new(store);
    let pricing = resolver.price_for_quantity(3, 2).unwrap();
    assert_eq!(pricing.unit_price, 6.0);
    assert_eq!(pricing.savings, -2.0);
}

#[test]
fn overlapping_brackets_resolve_to_highest_min_quantity() {
    let mut store = InMemoryStore::new();
    store.add_product(
        Product {
            id: 4,
            name: "Overlap".to_string(),
            base_price: 10.0,
        },
        vec![tier(4, 1, Some(20), 9.0), tier(4, 10, Some(30), 7.0)],
    );
    let resolver = PricingTierResolver::new(store);
    // Quantity 15 sits in both brackets; the 10-30 tier wins.
    let pricing = resolver.price_for_quantity(4, 15).unwrap();
    assert_eq!(pricing.unit_price, 7.0);
    assert_eq!(pricing.tier, "10-30 units");
}

#[test]
fn quantity_below_all_brackets_uses_base() {
    let mut store = InMemoryStore::new();
    store.add_product(
        Product {
            id: 5,
            name: "BulkOnly".to_string(),
            base_price: 8.0,
        },
        vec![tier(5, 100, None, 4.0)],
    );
    let resolver = PricingTierResolver::new(store);
    let pricing = resolver.price_for_quantity(5, 10).unwrap();
    assert_eq!(pricing.unit_price, 8.0);
    assert_eq!(pricing.tier, "Base");
}
