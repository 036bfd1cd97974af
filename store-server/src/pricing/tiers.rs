//! Quantity tier evaluation
//!
//! Picks the highest configured tier whose `min_quantity` the cart satisfies
//! and computes the discount against the subtotal. The next tier up is
//! reported for upsell messaging but never applied.

use super::money::{percent_of, round_units, to_decimal};
use shared::checkout::DiscountTier;

/// Result of evaluating the configured tiers against a cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierOutcome {
    /// Discount in whole currency units, always `<= subtotal`
    pub discount: i64,
    /// Percent of the applied tier, 0 when none applies
    pub percent: u32,
    /// The tier that applied, if any
    pub applied: Option<DiscountTier>,
    /// Smallest configured tier above the current quantity
    pub next: Option<DiscountTier>,
}

/// Evaluate quantity tiers for a cart
///
/// `tiers` may arrive in any order; they are evaluated ascending by
/// `min_quantity`. An empty cart or an empty tier table yields a zero
/// outcome.
pub fn evaluate(tiers: &[DiscountTier], subtotal: i64, total_quantity: i64) -> TierOutcome {
    if tiers.is_empty() || total_quantity <= 0 {
        return TierOutcome::default();
    }

    let mut sorted: Vec<&DiscountTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_quantity);

    let applied = sorted
        .iter()
        .rev()
        .find(|t| t.min_quantity <= total_quantity)
        .map(|t| (*t).clone());

    let next = sorted
        .iter()
        .find(|t| t.min_quantity > total_quantity)
        .map(|t| (*t).clone());

    let (discount, percent) = match &applied {
        Some(tier) => {
            let raw = percent_of(to_decimal(subtotal), to_decimal(tier.discount_percent as i64));
            (round_units(raw).min(subtotal), tier.discount_percent)
        }
        None => (0, 0),
    };

    TierOutcome {
        discount,
        percent,
        applied,
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_quantity: i64, discount_percent: u32) -> DiscountTier {
        DiscountTier {
            min_quantity,
            discount_percent,
        }
    }

    #[test]
    fn test_below_first_tier() {
        // cart [{price:500, qty:2}], tiers [{3,10%}] → no discount
        let outcome = evaluate(&[tier(3, 10)], 1000, 2);
        assert_eq!(outcome.discount, 0);
        assert_eq!(outcome.percent, 0);
        assert!(outcome.applied.is_none());
        assert_eq!(outcome.next, Some(tier(3, 10)));
    }

    #[test]
    fn test_first_tier_applies() {
        // qty 3, subtotal 1500, tier {3,10%} → 150
        let outcome = evaluate(&[tier(3, 10)], 1500, 3);
        assert_eq!(outcome.discount, 150);
        assert_eq!(outcome.percent, 10);
        assert_eq!(outcome.applied, Some(tier(3, 10)));
        assert!(outcome.next.is_none());
    }

    #[test]
    fn test_highest_satisfied_tier_wins() {
        let tiers = [tier(3, 10), tier(5, 20)];
        let outcome = evaluate(&tiers, 5000, 6);
        assert_eq!(outcome.percent, 20);
        assert_eq!(outcome.discount, 1000);
        assert!(outcome.next.is_none());
    }

    #[test]
    fn test_next_tier_reported() {
        let tiers = [tier(3, 10), tier(5, 20)];
        let outcome = evaluate(&tiers, 2000, 3);
        assert_eq!(outcome.percent, 10);
        assert_eq!(outcome.discount, 200);
        assert_eq!(outcome.next, Some(tier(5, 20)));
    }

    #[test]
    fn test_unsorted_tiers() {
        let tiers = [tier(5, 20), tier(3, 10)];
        let outcome = evaluate(&tiers, 1000, 4);
        assert_eq!(outcome.percent, 10);
        assert_eq!(outcome.next, Some(tier(5, 20)));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(evaluate(&[], 1000, 4), TierOutcome::default());
        assert_eq!(evaluate(&[tier(3, 10)], 0, 0), TierOutcome::default());
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 10% of 1245 = 124.5 → 125
        let outcome = evaluate(&[tier(1, 10)], 1245, 1);
        assert_eq!(outcome.discount, 125);
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        // A misconfigured 150% tier must not exceed the subtotal
        let outcome = evaluate(&[tier(1, 150)], 1000, 1);
        assert_eq!(outcome.discount, 1000);
    }
}
