//! Client-side promotion estimates: projected reach, engagement, delivery
//! cost, and the credits-then-card budget split.
//!
//! Everything here is pure and deterministic so the promotion form can
//! recompute on every keystroke without a backend round-trip. Negative
//! inputs are clamped to zero rather than rejected; no function panics.

use payloads::PromotionMode;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, dec};

/// People reached per paid unit. Awareness buys broad impressions;
/// engagement units are fewer but deeper.
const REACH_PER_UNIT_AWARENESS: u64 = 40;
const REACH_PER_UNIT_ENGAGEMENT: u64 = 12;

/// Each targeted interest narrows the projected audience, floored so a
/// long interest list can't zero the estimate out.
const NARROWING_PER_INTEREST: Decimal = dec!(0.85);
const NARROWING_FLOOR: Decimal = dec!(0.30);

/// Expected interaction rate among reached users.
const ENGAGEMENT_RATE_AWARENESS: Decimal = dec!(0.02);
const ENGAGEMENT_RATE_ENGAGEMENT: Decimal = dec!(0.08);

/// Delivery pricing: per-mille on reach plus per-interaction.
const COST_PER_MILLE: Decimal = dec!(4.50);
const COST_PER_ENGAGEMENT: Decimal = dec!(0.12);

/// Live feedback for the promotion-creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionEstimate {
    pub estimated_reach: u64,
    pub estimated_engagements: u64,
    pub estimated_cost: Decimal,
}

/// How a requested budget splits between promotional credits and an
/// external card charge. Credits are consumed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditWaterfall {
    pub amount_from_credits: Decimal,
    pub amount_charged: Decimal,
    pub needs_payment_method: bool,
}

fn narrowing_factor(interest_count: usize) -> Decimal {
    let mut factor = Decimal::ONE;
    for _ in 0..interest_count {
        factor *= NARROWING_PER_INTEREST;
        if factor <= NARROWING_FLOOR {
            return NARROWING_FLOOR;
        }
    }
    factor
}

/// Projected number of people a promotion will reach.
///
/// Non-decreasing in budget and non-increasing in bid; a non-positive bid
/// yields zero reach (the form disables submission in that state anyway).
pub fn estimate_reach(
    budget: Decimal,
    bid_amount: Decimal,
    mode: PromotionMode,
    audience_interests: &[String],
) -> u64 {
    let budget = budget.max(Decimal::ZERO);
    if bid_amount <= Decimal::ZERO {
        return 0;
    }

    let per_unit = match mode {
        PromotionMode::Awareness => REACH_PER_UNIT_AWARENESS,
        PromotionMode::Engagement => REACH_PER_UNIT_ENGAGEMENT,
    };

    // Saturate instead of panicking if someone types an absurd budget.
    let units = match budget.checked_div(bid_amount) {
        Some(units) => units,
        None => return u64::MAX,
    };
    let base = units
        .checked_mul(Decimal::from(per_unit))
        .unwrap_or(Decimal::MAX);

    (base * narrowing_factor(audience_interests.len()))
        .floor()
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Interactions expected out of a projected reach.
pub fn estimate_engagements(reach: u64, mode: PromotionMode) -> u64 {
    let rate = match mode {
        PromotionMode::Awareness => ENGAGEMENT_RATE_AWARENESS,
        PromotionMode::Engagement => ENGAGEMENT_RATE_ENGAGEMENT,
    };
    (Decimal::from(reach) * rate).floor().to_u64().unwrap_or(u64::MAX)
}

/// Projected delivery cost for a reach/engagement pair, rounded to cents.
pub fn calculate_promotion_estimate(reach: u64, engagements: u64) -> Decimal {
    let reach_cost = Decimal::from(reach) * COST_PER_MILLE / dec!(1000);
    let engagement_cost = Decimal::from(engagements) * COST_PER_ENGAGEMENT;
    (reach_cost + engagement_cost).round_dp(2)
}

/// Full estimate bundle for the promotion form's change handler.
pub fn estimate_promotion(
    budget: Decimal,
    bid_amount: Decimal,
    mode: PromotionMode,
    audience_interests: &[String],
) -> PromotionEstimate {
    let estimated_reach =
        estimate_reach(budget, bid_amount, mode, audience_interests);
    let estimated_engagements = estimate_engagements(estimated_reach, mode);
    PromotionEstimate {
        estimated_reach,
        estimated_engagements,
        estimated_cost: calculate_promotion_estimate(
            estimated_reach,
            estimated_engagements,
        ),
    }
}

/// Split a requested budget between available promotional credits and an
/// external charge. Credits cover as much as they can; the remainder is
/// charged to the payment method.
pub fn compute_credit_waterfall(
    requested_budget: Decimal,
    available_credits: Decimal,
) -> CreditWaterfall {
    let requested = requested_budget.max(Decimal::ZERO);
    let credits = available_credits.max(Decimal::ZERO);
    let amount_from_credits = credits.min(requested);

    CreditWaterfall {
        amount_from_credits,
        amount_charged: requested - amount_from_credits,
        needs_payment_method: requested > credits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waterfall_credits_cover_budget() {
        let split = compute_credit_waterfall(dec!(100), dec!(150));
        assert_eq!(split.amount_from_credits, dec!(100));
        assert_eq!(split.amount_charged, dec!(0));
        assert!(!split.needs_payment_method);
    }

    #[test]
    fn waterfall_budget_exceeds_credits() {
        let split = compute_credit_waterfall(dec!(150), dec!(100));
        assert_eq!(split.amount_from_credits, dec!(100));
        assert_eq!(split.amount_charged, dec!(50));
        assert!(split.needs_payment_method);
    }

    #[test]
    fn waterfall_all_zero() {
        let split = compute_credit_waterfall(dec!(0), dec!(0));
        assert_eq!(split.amount_from_credits, dec!(0));
        assert_eq!(split.amount_charged, dec!(0));
        assert!(!split.needs_payment_method);
    }

    #[test]
    fn waterfall_no_credits() {
        let split = compute_credit_waterfall(dec!(75), dec!(0));
        assert_eq!(split.amount_from_credits, dec!(0));
        assert_eq!(split.amount_charged, dec!(75));
        assert!(split.needs_payment_method);
    }

    #[test]
    fn waterfall_clamps_negative_inputs() {
        let split = compute_credit_waterfall(dec!(-20), dec!(-5));
        assert_eq!(split.amount_from_credits, dec!(0));
        assert_eq!(split.amount_charged, dec!(0));
        assert!(!split.needs_payment_method);
    }

    #[test]
    fn reach_grows_with_budget() {
        let none: &[String] = &[];
        let low = estimate_reach(dec!(100), dec!(2), PromotionMode::Awareness, none);
        let high = estimate_reach(dec!(200), dec!(2), PromotionMode::Awareness, none);
        assert!(high >= low);
        assert!(low > 0);
    }

    #[test]
    fn reach_shrinks_with_bid() {
        let none: &[String] = &[];
        let cheap = estimate_reach(dec!(100), dec!(1), PromotionMode::Awareness, none);
        let dear = estimate_reach(dec!(100), dec!(4), PromotionMode::Awareness, none);
        assert!(cheap >= dear);
    }

    #[test]
    fn reach_zero_on_nonpositive_bid() {
        let none: &[String] = &[];
        assert_eq!(
            estimate_reach(dec!(100), dec!(0), PromotionMode::Awareness, none),
            0
        );
        assert_eq!(
            estimate_reach(dec!(100), dec!(-1), PromotionMode::Awareness, none),
            0
        );
    }

    #[test]
    fn reach_clamps_negative_budget() {
        let none: &[String] = &[];
        assert_eq!(
            estimate_reach(dec!(-50), dec!(2), PromotionMode::Awareness, none),
            0
        );
    }

    #[test]
    fn interests_narrow_but_never_zero_reach() {
        let broad = estimate_reach(dec!(100), dec!(2), PromotionMode::Awareness, &[]);
        let narrow: Vec<String> =
            (0..3).map(|i| format!("interest-{i}")).collect();
        let narrowed =
            estimate_reach(dec!(100), dec!(2), PromotionMode::Awareness, &narrow);
        assert!(narrowed < broad);

        // A very long interest list bottoms out at the floor factor.
        let many: Vec<String> =
            (0..50).map(|i| format!("interest-{i}")).collect();
        let floored =
            estimate_reach(dec!(100), dec!(2), PromotionMode::Awareness, &many);
        assert_eq!(floored, (dec!(2000) * NARROWING_FLOOR).to_u64().unwrap());
    }

    #[test]
    fn awareness_reaches_wider_than_engagement() {
        let none: &[String] = &[];
        let awareness =
            estimate_reach(dec!(100), dec!(2), PromotionMode::Awareness, none);
        let engagement =
            estimate_reach(dec!(100), dec!(2), PromotionMode::Engagement, none);
        assert!(awareness > engagement);
    }

    #[test]
    fn cost_monotonic_and_rounded() {
        let small = calculate_promotion_estimate(1_000, 20);
        let bigger_reach = calculate_promotion_estimate(2_000, 20);
        let more_engagement = calculate_promotion_estimate(1_000, 40);
        assert!(bigger_reach > small);
        assert!(more_engagement > small);
        assert!(small >= dec!(0));
        assert_eq!(small, dec!(6.90)); // 4.50 + 20 * 0.12
        assert_eq!(calculate_promotion_estimate(0, 0), dec!(0));
    }

    #[test]
    fn estimate_bundle_is_consistent() {
        let estimate = estimate_promotion(
            dec!(100),
            dec!(2),
            PromotionMode::Engagement,
            &[],
        );
        assert_eq!(
            estimate.estimated_reach,
            estimate_reach(dec!(100), dec!(2), PromotionMode::Engagement, &[])
        );
        assert_eq!(
            estimate.estimated_engagements,
            estimate_engagements(
                estimate.estimated_reach,
                PromotionMode::Engagement
            )
        );
        assert_eq!(
            estimate.estimated_cost,
            calculate_promotion_estimate(
                estimate.estimated_reach,
                estimate.estimated_engagements
            )
        );
    }
}
