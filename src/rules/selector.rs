use crate::rules::types::FeeRule;

/// The winning rule for each fee component, selected independently.
///
/// A single rule can win more than one component, and different rules can
/// win different components. A `None` slot means the caller falls back to
/// the built-in defaults for that component.
#[derive(Debug, Default)]
pub struct SelectedRules<'a> {
    pub platform: Option<&'a FeeRule>,
    pub payment: Option<&'a FeeRule>,
    pub listing: Option<&'a FeeRule>,
}

/// Ordering key for the winner of a component: highest priority wins,
/// version breaks priority ties, and id makes the ordering total so the
/// outcome never depends on store return order.
fn rank(rule: &FeeRule) -> (i32, i32, u64) {
    (rule.priority, rule.version, rule.id)
}

fn pick<'a>(
    candidates: &'a [FeeRule],
    eligible: impl Fn(&FeeRule) -> bool,
) -> Option<&'a FeeRule> {
    candidates
        .iter()
        .filter(|r| eligible(r))
        .max_by_key(|r| rank(r))
}

/// Picks at most one winning rule per fee component from a candidate list
/// already filtered for applicability (scope, active window, price range).
///
/// Pure function: no side effects, deterministic for any input ordering.
pub fn select_rules(candidates: &[FeeRule]) -> SelectedRules<'_> {
    SelectedRules {
        // Every applicable rule defines a platform fee (PERCENTAGE or FIXED).
        platform: pick(candidates, |_| true),
        payment: pick(candidates, |r| r.payment_processing_fee.is_some()),
        listing: pick(candidates, |r| r.listing_fee.is_some()),
    }
}
