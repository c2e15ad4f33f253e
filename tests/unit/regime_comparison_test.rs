// Dual-regime comparison: ordering, grading bands, coupon strategy
//
// Validates:
// - DDP price >= DDU price for any non-negative duty/tax burden
// - The 5/10/15 grading bands and the min(10, delta/2) coupon discount
// - The declared-shipping cap moves excess shipping into the price

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crossprice::fees::{CommissionTier, MarketplaceFeeSchedule, PaymentProcessorFee};
use crossprice::pricing::{Competitiveness, CouponStrategy, ItemEconomics, RegimeComparator};
use crossprice::tariffs::TariffRule;

fn economics() -> ItemEconomics {
    ItemEconomics::new(dec!(80000), dec!(500), dec!(200), dec!(500), dec!(0)).unwrap()
}

fn schedule() -> MarketplaceFeeSchedule {
    MarketplaceFeeSchedule::new(
        "ebay",
        "electronics",
        vec![
            CommissionTier {
                upper_bound: Some(dec!(7500)),
                rate: dec!(0.129),
            },
            CommissionTier {
                upper_bound: None,
                rate: dec!(0.0235),
            },
        ],
        Decimal::ZERO,
        PaymentProcessorFee {
            rate: dec!(0.0349),
            fixed_fee: dec!(0.49),
        },
    )
    .unwrap()
}

fn rule(duty: Decimal, tax: Decimal) -> TariffRule {
    TariffRule {
        jurisdiction: "us".to_string(),
        classification: "electronics".to_string(),
        duty_rate: duty,
        tax_rate: tax,
        duty_free_threshold: Decimal::ZERO,
        agreement: None,
        declared_shipping_cap: None,
    }
}

proptest! {
    #[test]
    fn test_regime_ordering_holds_for_any_burden(
        duty_bp in 0u32..2_500u32,
        tax_bp in 0u32..2_500u32,
        margin_tenths in 0u32..600u32
    ) {
        let comparator = RegimeComparator::new();
        let result = comparator
            .compare(
                &economics(),
                &schedule(),
                &rule(
                    Decimal::from(duty_bp) / Decimal::from(10_000),
                    Decimal::from(tax_bp) / Decimal::from(10_000),
                ),
                "JP",
                dec!(157.5),
                Decimal::from(margin_tenths) / Decimal::from(10),
                dec!(25),
            )
            .unwrap();

        prop_assert!(
            result.ddp.sell_price >= result.ddu.sell_price,
            "DDP {} below DDU {} at duty {}bp tax {}bp",
            result.ddp.sell_price, result.ddu.sell_price, duty_bp, tax_bp
        );
        prop_assert!(result.delta_percent >= Decimal::ZERO);
    }

    #[test]
    fn test_grading_bands_partition_the_delta_axis(
        duty_bp in 0u32..2_500u32,
        tax_bp in 0u32..2_500u32
    ) {
        let comparator = RegimeComparator::new();
        let result = comparator
            .compare(
                &economics(),
                &schedule(),
                &rule(
                    Decimal::from(duty_bp) / Decimal::from(10_000),
                    Decimal::from(tax_bp) / Decimal::from(10_000),
                ),
                "JP",
                dec!(157.5),
                dec!(17),
                dec!(25),
            )
            .unwrap();

        let d = result.delta_percent;
        let expected = if d <= dec!(5) {
            Competitiveness::Excellent
        } else if d <= dec!(10) {
            Competitiveness::Good
        } else if d <= dec!(15) {
            Competitiveness::Fair
        } else {
            Competitiveness::Poor
        };
        prop_assert_eq!(result.competitiveness, expected);

        match &result.coupon {
            CouponStrategy::NotRecommended { .. } => prop_assert!(d <= dec!(5)),
            CouponStrategy::PercentageDiscount { discount_percent, .. } => {
                prop_assert!(d > dec!(5) && d <= dec!(15));
                prop_assert_eq!(
                    *discount_percent,
                    (d / Decimal::TWO).min(dec!(10)).round_dp(1)
                );
            }
            CouponStrategy::ManualReview { .. } => prop_assert!(d > dec!(15)),
        }
    }
}

#[test]
fn test_small_gap_skips_the_coupon() {
    let comparator = RegimeComparator::new();
    let result = comparator
        .compare(
            &economics(),
            &schedule(),
            &rule(dec!(0.02), Decimal::ZERO),
            "JP",
            dec!(157.5),
            dec!(17),
            dec!(25),
        )
        .unwrap();

    assert!(result.delta_percent <= dec!(5));
    assert_eq!(result.competitiveness, Competitiveness::Excellent);
    assert!(matches!(result.coupon, CouponStrategy::NotRecommended { .. }));
}

#[test]
fn test_mid_gap_gets_half_delta_discount_targeting_ddu_markets() {
    let comparator = RegimeComparator::new();
    let result = comparator
        .compare(
            &economics(),
            &schedule(),
            &rule(dec!(0.075), Decimal::ZERO),
            "JP",
            dec!(157.5),
            dec!(17),
            dec!(25),
        )
        .unwrap();

    assert!(result.delta_percent > dec!(5) && result.delta_percent <= dec!(15));
    match result.coupon {
        CouponStrategy::PercentageDiscount {
            discount_percent,
            target_markets,
        } => {
            assert!(discount_percent <= dec!(10));
            assert_eq!(target_markets, vec!["us".to_string()]);
        }
        other => panic!("expected a discount recommendation, got {:?}", other),
    }
}

#[test]
fn test_wide_gap_is_flagged_for_review() {
    let comparator = RegimeComparator::new();
    let result = comparator
        .compare(
            &economics(),
            &schedule(),
            &rule(dec!(0.15), dec!(0.20)),
            "JP",
            dec!(157.5),
            dec!(17),
            dec!(25),
        )
        .unwrap();

    assert_eq!(result.competitiveness, Competitiveness::Poor);
    assert!(matches!(result.coupon, CouponStrategy::ManualReview { .. }));
}

#[test]
fn test_shipping_cap_reshapes_the_ddp_listing() {
    let comparator = RegimeComparator::new();
    let mut capped_rule = rule(dec!(0.075), Decimal::ZERO);
    capped_rule.declared_shipping_cap = Some(dec!(25));

    let capped = comparator
        .compare(
            &economics(),
            &schedule(),
            &capped_rule,
            "JP",
            dec!(157.5),
            dec!(17),
            dec!(40),
        )
        .unwrap();
    let uncapped = comparator
        .compare(
            &economics(),
            &schedule(),
            &rule(dec!(0.075), Decimal::ZERO),
            "JP",
            dec!(157.5),
            dec!(17),
            dec!(40),
        )
        .unwrap();

    assert_eq!(capped.ddp.shipping_price, dec!(25));
    assert_eq!(capped.ddp.sell_price, uncapped.ddp.sell_price + dec!(15));
    assert_eq!(capped.ddp.revenue, uncapped.ddp.revenue);
}
