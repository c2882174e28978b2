use serde::{Deserialize, Serialize};

use crate::errors::FeeError;
use crate::store::ProductStore;
use crate::util::round2;

/// A wholesale product with its non-discounted unit price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub base_price: f64,
}

/// One quantity bracket of a wholesale price schedule.
///
/// Brackets are inclusive on both ends; `max_quantity = None` leaves the
/// bracket unbounded above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTier {
    pub product_id: u64,
    pub min_quantity: u32,
    #[serde(default)]
    pub max_quantity: Option<u32>,
    pub price_per_unit: f64,
}

impl PricingTier {
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Human-readable bracket label, e.g. "10-49 units" or "100+ units".
    pub fn label(&self) -> String {
        match self.max_quantity {
            Some(max) => format!("{}-{} units", self.min_quantity, max),
            None => format!("{}+ units", self.min_quantity),
        }
    }
}

/// The price quote for a requested quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierPricing {
    pub unit_price: f64,
    pub total_price: f64,
    /// Versus buying at base price. Negative when the matched tier is more
    /// expensive than base; never clamped.
    pub savings: f64,
    pub tier: String,
}

/// Resolves a wholesale quantity against a product's tier schedule.
pub struct PricingTierResolver<S> {
    store: S,
}

impl<S: ProductStore> PricingTierResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finds the tier whose bracket contains `quantity` and quotes it.
    ///
    /// Tiers are walked in descending `min_quantity` order so that when
    /// brackets overlap (which the catalog should prevent, but cannot be
    /// assumed) the highest bracket wins. With no matching tier the quote
    /// falls back to the product's base price under the "Base" label.
    pub fn price_for_quantity(&self, product_id: u64, quantity: u32) -> Result<TierPricing, FeeError> {
        let product = self
            .store
            .find_product(product_id)
            .map_err(FeeError::store)?
            .ok_or(FeeError::ProductNotFound { product_id })?;

        let mut tiers = self
            .store
            .find_pricing_tiers(product_id)
            .map_err(FeeError::store)?;
        tiers.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));

        let matched = tiers.iter().find(|t| t.contains(quantity));
        let (unit_price, tier) = match matched {
            Some(t) => (t.price_per_unit, t.label()),
            None => (product.base_price, "Base".to_string()),
        };

        let total_price = round2(unit_price * quantity as f64);
        let savings = round2(product.base_price * quantity as f64 - total_price);

        Ok(TierPricing {
            unit_price,
            total_price,
            savings,
            tier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_bounds_are_inclusive() {
        let tier = PricingTier {
            product_id: 1,
            min_quantity: 10,
            max_quantity: Some(49),
            price_per_unit: 8.0,
        };
        assert!(tier.contains(10));
        assert!(tier.contains(49));
        assert!(!tier.contains(9));
        assert!(!tier.contains(50));
    }

    #[test]
    fn unbounded_bracket_label() {
        let tier = PricingTier {
            product_id: 1,
            min_quantity: 100,
            max_quantity: None,
            price_per_unit: 5.0,
        };
        assert!(tier.contains(1_000_000));
        assert_eq!(tier.label(), "100+ units");
    }
}
