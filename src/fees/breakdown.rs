use serde::{Deserialize, Serialize};

/// Which rule produced a fee component.
///
/// Serializes as `"default"` or `{"rule": <id>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedRule {
    /// No configured rule matched; the built-in default was used.
    Default,
    Rule(u64),
}

/// One fee component of the breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeComponent {
    /// Amount in the request currency, rounded to 2 decimals.
    pub amount: f64,
    /// The percentage applied, absent for fixed-amount components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub platform: FeeComponent,
    pub payment_processing: FeeComponent,
    pub listing: FeeComponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRules {
    pub platform: AppliedRule,
    pub payment_processing: AppliedRule,
    pub listing: AppliedRule,
}

/// The full fee calculation result.
///
/// Invariants: `total_fee` equals the sum of the three component amounts
/// (each rounded to 2 decimals before summing), and
/// `net_amount = price - total_fee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub platform_fee: f64,
    pub payment_processing_fee: f64,
    pub listing_fee: f64,
    pub total_fee: f64,
    pub net_amount: f64,
    pub currency: String,
    pub breakdown: ComponentBreakdown,
    pub applied_rules: AppliedRules,
}
