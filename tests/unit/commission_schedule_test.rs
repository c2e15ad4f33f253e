// Property-based tests for tiered commission evaluation
//
// Validates:
// - Commission is non-decreasing in price (monotonicity)
// - Commission is continuous at tier boundaries (no jump)
// - The marginal walk matches a slice-by-slice reference computation

use proptest::prelude::*;
use rust_decimal::Decimal;

use crossprice::fees::{CommissionTier, FeeEvaluator, MarketplaceFeeSchedule, PaymentProcessorFee};

/// Build a valid schedule from raw integers: `bounds` become the closed
/// tier boundaries, `rates_bp` (basis points) supply one rate per tier.
fn schedule_from(bounds: Vec<u32>, rates_bp: &[u32]) -> MarketplaceFeeSchedule {
    let mut tiers: Vec<CommissionTier> = bounds
        .iter()
        .enumerate()
        .map(|(i, bound)| CommissionTier {
            upper_bound: Some(Decimal::from(*bound)),
            rate: Decimal::from(rates_bp[i]) / Decimal::from(10_000),
        })
        .collect();
    tiers.push(CommissionTier {
        upper_bound: None,
        rate: Decimal::from(rates_bp[bounds.len()]) / Decimal::from(10_000),
    });

    MarketplaceFeeSchedule::new(
        "test-market",
        "test-category",
        tiers,
        Decimal::ZERO,
        PaymentProcessorFee {
            rate: Decimal::ZERO,
            fixed_fee: Decimal::ZERO,
        },
    )
    .expect("generated schedule is valid")
}

fn bounds_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(100u32..100_000u32, 0..=3)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn test_commission_is_monotone_in_price(
        bounds in bounds_strategy(),
        rates_bp in prop::collection::vec(0u32..5_000u32, 4),
        price_a_cents in 0u64..20_000_000u64,
        price_b_cents in 0u64..20_000_000u64
    ) {
        let schedule = schedule_from(bounds, &rates_bp);
        let evaluator = FeeEvaluator::new();

        let (lo, hi) = if price_a_cents <= price_b_cents {
            (price_a_cents, price_b_cents)
        } else {
            (price_b_cents, price_a_cents)
        };
        let lo = Decimal::from(lo) / Decimal::from(100);
        let hi = Decimal::from(hi) / Decimal::from(100);

        let commission_lo = evaluator.commission(&schedule, lo).unwrap();
        let commission_hi = evaluator.commission(&schedule, hi).unwrap();

        prop_assert!(
            commission_lo <= commission_hi,
            "commission must be non-decreasing: c({}) = {} > c({}) = {}",
            lo, commission_lo, hi, commission_hi
        );
    }

    #[test]
    fn test_commission_is_continuous_at_tier_boundaries(
        bounds in bounds_strategy(),
        rates_bp in prop::collection::vec(0u32..5_000u32, 4)
    ) {
        let schedule = schedule_from(bounds.clone(), &rates_bp);
        let evaluator = FeeEvaluator::new();
        let step = Decimal::new(1, 2); // 0.01

        for bound in bounds {
            let at = Decimal::from(bound);
            let below = evaluator.commission(&schedule, at - step).unwrap();
            let at_bound = evaluator.commission(&schedule, at).unwrap();
            let above = evaluator.commission(&schedule, at + step).unwrap();

            // A 0.01 step moves commission by at most 0.01 * 50% = 0.005:
            // any larger gap would be a jump discontinuity
            prop_assert!(at_bound - below <= Decimal::new(5, 3));
            prop_assert!(above - at_bound <= Decimal::new(5, 3));
            prop_assert!(below <= at_bound && at_bound <= above);
        }
    }

    #[test]
    fn test_commission_never_exceeds_top_rate_times_price(
        bounds in bounds_strategy(),
        rates_bp in prop::collection::vec(0u32..5_000u32, 4),
        price_cents in 0u64..20_000_000u64
    ) {
        let schedule = schedule_from(bounds, &rates_bp);
        let evaluator = FeeEvaluator::new();
        let price = Decimal::from(price_cents) / Decimal::from(100);

        let max_rate = rates_bp
            .iter()
            .map(|bp| Decimal::from(*bp) / Decimal::from(10_000))
            .max()
            .unwrap();
        let commission = evaluator.commission(&schedule, price).unwrap();

        prop_assert!(commission >= Decimal::ZERO);
        prop_assert!(
            commission <= price * max_rate,
            "commission {} exceeds price {} * max rate {}",
            commission, price, max_rate
        );
    }
}

#[test]
fn test_marginal_walk_matches_reference_slices() {
    // 10% to 100, 5% to 500, 1% above: commission(1000) assembled by hand
    let schedule = MarketplaceFeeSchedule::new(
        "test-market",
        "test-category",
        vec![
            CommissionTier {
                upper_bound: Some(Decimal::from(100)),
                rate: Decimal::new(10, 2),
            },
            CommissionTier {
                upper_bound: Some(Decimal::from(500)),
                rate: Decimal::new(5, 2),
            },
            CommissionTier {
                upper_bound: None,
                rate: Decimal::new(1, 2),
            },
        ],
        Decimal::ZERO,
        PaymentProcessorFee {
            rate: Decimal::ZERO,
            fixed_fee: Decimal::ZERO,
        },
    )
    .unwrap();

    let evaluator = FeeEvaluator::new();
    // 100*10% + 400*5% + 500*1% = 10 + 20 + 5
    assert_eq!(
        evaluator.commission(&schedule, Decimal::from(1000)).unwrap(),
        Decimal::from(35)
    );
    // Inside the second tier: 100*10% + 150*5%
    assert_eq!(
        evaluator.commission(&schedule, Decimal::from(250)).unwrap(),
        Decimal::new(175, 1)
    );
}
