pub mod breakdown;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::FeeError;
use crate::rules::selector::select_rules;
use crate::rules::types::{FeeRule, FeeType, ListingType, RuleQuery};
use crate::store::RuleStore;
use crate::util::round2;

pub use breakdown::{AppliedRule, AppliedRules, ComponentBreakdown, FeeBreakdown, FeeComponent};

/// Built-in platform fee schedule used when no configured rule matches.
/// Boundaries are inclusive upper bounds: a price of exactly 100 pays 10%.
pub const DEFAULT_TIERS: [(f64, f64); 2] = [(100.0, 10.0), (500.0, 8.0)];
/// Rate above the last default tier boundary.
pub const DEFAULT_TOP_RATE: f64 = 6.0;
/// Default payment processing percentage. Flat per-transaction additions
/// (e.g. a fixed $0.30) belong to the payment gateway, not this engine.
pub const DEFAULT_PAYMENT_FEE_PCT: f64 = 2.9;
/// Ceiling on accepted prices.
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct FeeConfig {
    pub max_price: f64,
    pub default_payment_fee_pct: f64,
    pub default_currency: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            default_payment_fee_pct: DEFAULT_PAYMENT_FEE_PCT,
            default_currency: "USD".to_string(),
        }
    }
}

/// One fee calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeInput {
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Computes the fee breakdown for a listing sale.
///
/// The rule store is an injected dependency; the calculator itself is a
/// pure transformation over whatever rules the store returns, so two calls
/// with the same input against an unchanged rule set produce identical
/// breakdowns.
pub struct FeeCalculator<S> {
    store: S,
    config: FeeConfig,
}

impl<S: RuleStore> FeeCalculator<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, FeeConfig::default())
    }

    pub fn with_config(store: S, config: FeeConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Calculates fees against the rules in effect right now.
    pub fn calculate_fees(&self, input: &FeeInput) -> Result<FeeBreakdown, FeeError> {
        self.calculate_at(input, Utc::now(), None)
    }

    /// Reproduces the fee computed for a past transaction by pinning the
    /// evaluation instant and the maximum rule version. Rules created or
    /// bumped after the pin are invisible to the calculation.
    pub fn calculate_fees_with_version(
        &self,
        input: &FeeInput,
        rule_version: i32,
        effective_date: DateTime<Utc>,
    ) -> Result<FeeBreakdown, FeeError> {
        self.calculate_at(input, effective_date, Some(rule_version))
    }

    fn calculate_at(
        &self,
        input: &FeeInput,
        at: DateTime<Utc>,
        max_version: Option<i32>,
    ) -> Result<FeeBreakdown, FeeError> {
        if input.price <= 0.0 || !input.price.is_finite() {
            return Err(FeeError::InvalidPrice { price: input.price });
        }
        if input.price > self.config.max_price {
            return Err(FeeError::PriceTooLarge {
                price: input.price,
                max: self.config.max_price,
            });
        }

        let query = RuleQuery {
            category_id: input.category_id,
            listing_type: input.listing_type,
            price: input.price,
            at,
            max_version,
        };
        let candidates = self
            .store
            .find_applicable_fee_rules(&query)
            .map_err(FeeError::store)?;
        let selected = select_rules(&candidates);

        let (platform, platform_rule) = self.platform_component(input.price, selected.platform);
        let (payment, payment_rule) = self.payment_component(input.price, selected.payment);
        let (listing, listing_rule) = self.listing_component(selected.listing);

        let total_fee = round2(platform.amount + payment.amount + listing.amount);
        let net_amount = round2(input.price - total_fee);

        Ok(FeeBreakdown {
            platform_fee: platform.amount,
            payment_processing_fee: payment.amount,
            listing_fee: listing.amount,
            total_fee,
            net_amount,
            currency: input
                .currency
                .clone()
                .unwrap_or_else(|| self.config.default_currency.clone()),
            breakdown: ComponentBreakdown {
                platform,
                payment_processing: payment,
                listing,
            },
            applied_rules: AppliedRules {
                platform: platform_rule,
                payment_processing: payment_rule,
                listing: listing_rule,
            },
        })
    }

    fn platform_component(&self, price: f64, rule: Option<&FeeRule>) -> (FeeComponent, AppliedRule) {
        match rule {
            Some(r) => match r.fee_type {
                FeeType::Percentage => (
                    FeeComponent {
                        amount: round2(price * r.fee_value / 100.0),
                        percentage: Some(r.fee_value),
                        description: format!("Platform fee ({}%)", r.fee_value),
                    },
                    AppliedRule::Rule(r.id),
                ),
                FeeType::Fixed => (
                    FeeComponent {
                        amount: round2(r.fee_value),
                        percentage: None,
                        description: "Platform fee (fixed)".to_string(),
                    },
                    AppliedRule::Rule(r.id),
                ),
            },
            None => {
                let rate = default_platform_rate(price);
                (
                    FeeComponent {
                        amount: round2(price * rate / 100.0),
                        percentage: Some(rate),
                        description: format!("Platform fee (default {}% tier)", rate),
                    },
                    AppliedRule::Default,
                )
            }
        }
    }

    fn payment_component(&self, price: f64, rule: Option<&FeeRule>) -> (FeeComponent, AppliedRule) {
        let (rate, applied) = match rule {
            // Selector guarantees the field is set for a payment winner.
            Some(r) => (
                r.payment_processing_fee.unwrap_or(self.config.default_payment_fee_pct),
                AppliedRule::Rule(r.id),
            ),
            None => (self.config.default_payment_fee_pct, AppliedRule::Default),
        };
        (
            FeeComponent {
                amount: round2(price * rate / 100.0),
                percentage: Some(rate),
                description: format!("Payment processing ({}%)", rate),
            },
            applied,
        )
    }

    fn listing_component(&self, rule: Option<&FeeRule>) -> (FeeComponent, AppliedRule) {
        match rule.and_then(|r| r.listing_fee.map(|fee| (r.id, fee))) {
            Some((id, fee)) => (
                FeeComponent {
                    amount: round2(fee),
                    percentage: None,
                    description: "Listing fee".to_string(),
                },
                AppliedRule::Rule(id),
            ),
            None => (
                FeeComponent {
                    amount: 0.0,
                    percentage: None,
                    description: "No listing fee".to_string(),
                },
                AppliedRule::Default,
            ),
        }
    }
}

/// Default platform rate for a price, per the built-in tier schedule.
pub fn default_platform_rate(price: f64) -> f64 {
    for (limit, rate) in DEFAULT_TIERS {
        if price <= limit {
            return rate;
        }
    }
    DEFAULT_TOP_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_boundaries_are_inclusive() {
        assert_eq!(default_platform_rate(100.0), 10.0);
        assert_eq!(default_platform_rate(100.01), 8.0);
        assert_eq!(default_platform_rate(500.0), 8.0);
        assert_eq!(default_platform_rate(500.01), 6.0);
    }
}
