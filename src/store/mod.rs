pub mod loader;
pub mod memory;

use anyhow::Result;

use crate::pricing::{PricingTier, Product};
use crate::rules::types::{FeeRule, RuleQuery};

pub use memory::InMemoryStore;

/// Read-only access to configured fee rules.
///
/// Injected into [`crate::fees::FeeCalculator`] so tests can substitute a
/// double and production can back it with whatever persistent store the
/// service uses. Implementations must apply the full applicability filter
/// (scope, active flag, effective window, price range, version pin) before
/// returning; returned order is irrelevant, the selector re-ranks.
pub trait RuleStore {
    fn find_applicable_fee_rules(&self, query: &RuleQuery) -> Result<Vec<FeeRule>>;
}

/// Read-only access to wholesale products and their pricing tiers.
pub trait ProductStore {
    fn find_product(&self, product_id: u64) -> Result<Option<Product>>;

    /// Tiers for a product, in any order; the resolver sorts explicitly.
    fn find_pricing_tiers(&self, product_id: u64) -> Result<Vec<PricingTier>>;
}
