use std::collections::HashMap;

use anyhow::Result;

use crate::pricing::{PricingTier, Product};
use crate::rules::types::{FeeRule, RuleQuery};
use crate::store::{ProductStore, RuleStore};

/// In-memory store backing the CLI and tests.
///
/// Holds a full rule set and wholesale catalog and answers queries with the
/// same applicability semantics a database-backed store would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rules: Vec<FeeRule>,
    products: HashMap<u64, Product>,
    tiers: HashMap<u64, Vec<PricingTier>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<FeeRule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn add_rule(&mut self, rule: FeeRule) {
        self.rules.push(rule);
    }

    pub fn add_product(&mut self, product: Product, tiers: Vec<PricingTier>) {
        self.tiers.insert(product.id, tiers);
        self.products.insert(product.id, product);
    }

    pub fn rules(&self) -> &[FeeRule] {
        &self.rules
    }
}

impl RuleStore for InMemoryStore {
    fn find_applicable_fee_rules(&self, query: &RuleQuery) -> Result<Vec<FeeRule>> {
        Ok(self
            .rules
            .iter()
            .filter(|r| r.applies_to(query))
            .cloned()
            .collect())
    }
}

impl ProductStore for InMemoryStore {
    fn find_product(&self, product_id: u64) -> Result<Option<Product>> {
        Ok(self.products.get(&product_id).cloned())
    }

    fn find_pricing_tiers(&self, product_id: u64) -> Result<Vec<PricingTier>> {
        Ok(self.tiers.get(&product_id).cloned().unwrap_or_default())
    }
}
