use crate::rules::types::FeeRule;

/// A problem found in a configured rule set.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleIssue {
    /// min_price > max_price; the rule can never match.
    InvertedPriceBounds { rule_id: u64 },
    /// effective_to < effective_from; the window is empty.
    InvertedWindow { rule_id: u64 },
    /// Rule is flagged inactive.
    Inactive { rule_id: u64 },
    /// Two rules share priority and version and their scopes can overlap.
    /// Selection stays deterministic (id breaks the tie) but the overlap
    /// usually means one of them was meant to be superseded.
    AmbiguousOverlap { rule_id: u64, other_id: u64 },
}

fn scopes_overlap(a: &FeeRule, b: &FeeRule) -> bool {
    if a.category_id.is_some() && b.category_id.is_some() && a.category_id != b.category_id {
        return false;
    }
    if a.listing_type.is_some() && b.listing_type.is_some() && a.listing_type != b.listing_type {
        return false;
    }
    let a_min = a.min_price.unwrap_or(f64::NEG_INFINITY);
    let a_max = a.max_price.unwrap_or(f64::INFINITY);
    let b_min = b.min_price.unwrap_or(f64::NEG_INFINITY);
    let b_max = b.max_price.unwrap_or(f64::INFINITY);
    a_min <= b_max && b_min <= a_max
}

fn windows_overlap(a: &FeeRule, b: &FeeRule) -> bool {
    let a_to = a.effective_to.map_or(chrono::DateTime::<chrono::Utc>::MAX_UTC, |t| t);
    let b_to = b.effective_to.map_or(chrono::DateTime::<chrono::Utc>::MAX_UTC, |t| t);
    a.effective_from <= b_to && b.effective_from <= a_to
}

/// Sanity-checks a rule set as uploaded by an administrator.
///
/// Returns all issues found; an empty vec means the set is clean.
pub fn validate_rules(rules: &[FeeRule]) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    for rule in rules {
        if let (Some(min), Some(max)) = (rule.min_price, rule.max_price) {
            if min > max {
                issues.push(RuleIssue::InvertedPriceBounds { rule_id: rule.id });
            }
        }
        if let Some(until) = rule.effective_to {
            if until < rule.effective_from {
                issues.push(RuleIssue::InvertedWindow { rule_id: rule.id });
            }
        }
        if !rule.is_active {
            issues.push(RuleIssue::Inactive { rule_id: rule.id });
        }
    }

    for (i, a) in rules.iter().enumerate() {
        for b in rules.iter().skip(i + 1) {
            if a.is_active
                && b.is_active
                && a.priority == b.priority
                && a.version == b.version
                && scopes_overlap(a, b)
                && windows_overlap(a, b)
            {
                issues.push(RuleIssue::AmbiguousOverlap {
                    rule_id: a.id,
                    other_id: b.id,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::FeeType;
    use chrono::{TimeZone, Utc};

    fn rule(id: u64) -> FeeRule {
        FeeRule {
            id,
            category_id: None,
            listing_type: None,
            min_price: None,
            max_price: None,
            effective_from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            effective_to: None,
            fee_type: FeeType::Percentage,
            fee_value: 5.0,
            payment_processing_fee: None,
            listing_fee: None,
            priority: 1,
            version: 1,
            is_active: true,
        }
    }

    #[test]
    fn detects_inverted_price_bounds() {
        let mut r = rule(1);
        r.min_price = Some(500.0);
        r.max_price = Some(100.0);
        let issues = validate_rules(std::slice::from_ref(&r));
        assert!(issues.contains(&RuleIssue::InvertedPriceBounds { rule_id: 1 }));
    }

    #[test]
    fn detects_ambiguous_overlap() {
        let a = rule(1);
        let b = rule(2);
        let issues = validate_rules(&[a, b]);
        assert!(issues
            .iter()
            .any(|i| matches!(i, RuleIssue::AmbiguousOverlap { .. })));
    }

    #[test]
    fn disjoint_price_ranges_do_not_overlap() {
        let mut a = rule(1);
        a.max_price = Some(100.0);
        let mut b = rule(2);
        b.min_price = Some(200.0);
        let issues = validate_rules(&[a, b]);
        assert!(issues.is_empty());
    }

    #[test]
    fn different_priorities_are_not_ambiguous() {
        let a = rule(1);
        let mut b = rule(2);
        b.priority = 9;
        let issues = validate_rules(&[a, b]);
        assert!(issues.is_empty());
    }
}
