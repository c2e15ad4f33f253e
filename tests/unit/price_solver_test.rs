// Inverse-solver convergence and the reference scenario
//
// Validates:
// - The solved price reproduces the target margin within 0.01 points,
//   including when the price crosses a commission tier boundary
// - The eBay USA electronics scenario numbers, DDP and DDU
// - Degenerate inputs report 0% margin instead of failing

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crossprice::fees::{CommissionTier, MarketplaceFeeSchedule, PaymentProcessorFee};
use crossprice::pricing::{DutyRegime, ItemEconomics, PriceSolver};
use crossprice::tariffs::EffectiveTariff;

fn ebay_schedule() -> MarketplaceFeeSchedule {
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

fn tariff(duty_bp: u32, tax_bp: u32) -> EffectiveTariff {
    EffectiveTariff {
        duty_rate: Decimal::from(duty_bp) / Decimal::from(10_000),
        tax_rate: Decimal::from(tax_bp) / Decimal::from(10_000),
        duty_free_threshold: Decimal::ZERO,
        declared_shipping_cap: None,
    }
}

proptest! {
    #[test]
    fn test_solved_price_reproduces_target_margin(
        purchase_cost in 1_000u64..50_000_000u64,
        margin_tenths in 0u32..900u32, // 0.0% to 89.9%
        duty_bp in 0u32..2_000u32,
        tax_bp in 0u32..2_500u32,
        duties_included in any::<bool>()
    ) {
        let solver = PriceSolver::new();
        let economics = ItemEconomics::new(
            Decimal::from(purchase_cost),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        ).unwrap();
        let target = Decimal::from(margin_tenths) / Decimal::from(10);
        let schedule = ebay_schedule();
        let tariff = tariff(duty_bp, tax_bp);
        let rate = dec!(157.5);
        let regime = if duties_included { DutyRegime::Ddp } else { DutyRegime::Ddu };

        let price = solver
            .solve_target_margin(&economics, target, &schedule, &tariff, rate, regime)
            .unwrap();
        let quote = solver
            .evaluate(&economics, price, Decimal::ZERO, &schedule, &tariff, rate, regime)
            .unwrap();

        prop_assert!(
            (quote.margin_percent - target).abs() < dec!(0.01),
            "solved price {} yields margin {} instead of {}",
            price, quote.margin_percent, target
        );
    }

    #[test]
    fn test_ddp_price_never_below_ddu_price(
        purchase_cost in 1_000u64..50_000_000u64,
        margin_tenths in 0u32..900u32,
        duty_bp in 0u32..3_000u32,
        tax_bp in 0u32..2_500u32
    ) {
        let solver = PriceSolver::new();
        let economics = ItemEconomics::new(
            Decimal::from(purchase_cost),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        ).unwrap();
        let target = Decimal::from(margin_tenths) / Decimal::from(10);
        let schedule = ebay_schedule();
        let tariff = tariff(duty_bp, tax_bp);
        let rate = dec!(157.5);

        let ddu = solver
            .solve_target_margin(&economics, target, &schedule, &tariff, rate, DutyRegime::Ddu)
            .unwrap();
        let ddp = solver
            .solve_target_margin(&economics, target, &schedule, &tariff, rate, DutyRegime::Ddp)
            .unwrap();

        prop_assert!(
            ddp >= ddu,
            "DDP price {} fell below DDU price {} at duty {}bp tax {}bp",
            ddp, ddu, duty_bp, tax_bp
        );
    }
}

#[test]
fn test_reference_scenario_ddp() {
    let solver = PriceSolver::new();
    let economics =
        ItemEconomics::new(dec!(80000), dec!(500), dec!(200), dec!(500), dec!(0)).unwrap();
    let tariff = EffectiveTariff {
        duty_rate: dec!(0.075),
        tax_rate: Decimal::ZERO,
        duty_free_threshold: Decimal::ZERO,
        declared_shipping_cap: None,
    };

    let quote = solver
        .evaluate(
            &economics,
            dec!(800),
            dec!(25),
            &ebay_schedule(),
            &tariff,
            dec!(157.5),
            DutyRegime::Ddp,
        )
        .unwrap();

    assert_eq!(quote.revenue, dec!(825));
    assert_eq!(quote.duty, dec!(61.875));
    assert_eq!(quote.commission, dec!(106.425));
    assert_eq!(quote.payment_fee, dec!(29.2825));
    assert_eq!(quote.total_fees, dec!(135.7075));
    assert_eq!(quote.net_foreign, dec!(627.4175));
    assert_eq!(quote.net_domestic, dec!(98818.25625));
    assert_eq!(quote.total_cost_domestic, dec!(81200));
    assert_eq!(quote.profit_domestic, dec!(17618.25625));
    assert!((quote.margin_percent - dec!(17.83)).abs() < dec!(0.01));
    assert!((quote.roi_percent - dec!(21.70)).abs() < dec!(0.01));
}

#[test]
fn test_reference_scenario_ddu_nets_more() {
    let solver = PriceSolver::new();
    let economics =
        ItemEconomics::new(dec!(80000), dec!(500), dec!(200), dec!(500), dec!(0)).unwrap();
    let tariff = EffectiveTariff {
        duty_rate: dec!(0.075),
        tax_rate: Decimal::ZERO,
        duty_free_threshold: Decimal::ZERO,
        declared_shipping_cap: None,
    };
    let schedule = ebay_schedule();

    let ddu = solver
        .evaluate(
            &economics,
            dec!(800),
            dec!(25),
            &schedule,
            &tariff,
            dec!(157.5),
            DutyRegime::Ddu,
        )
        .unwrap();
    let ddp = solver
        .evaluate(
            &economics,
            dec!(800),
            dec!(25),
            &schedule,
            &tariff,
            dec!(157.5),
            DutyRegime::Ddp,
        )
        .unwrap();

    assert_eq!(ddu.net_foreign, dec!(689.2925));
    assert!(ddu.profit_domestic > ddp.profit_domestic);
    assert!(ddu.margin_percent > ddp.margin_percent);

    // For the same target margin the DDP listing must be priced higher
    let target = dec!(17);
    let ddu_price = solver
        .solve_target_margin(&economics, target, &schedule, &tariff, dec!(157.5), DutyRegime::Ddu)
        .unwrap();
    let ddp_price = solver
        .solve_target_margin(&economics, target, &schedule, &tariff, dec!(157.5), DutyRegime::Ddp)
        .unwrap();
    assert!(ddp_price > ddu_price);
}

#[test]
fn test_tier_crossing_price_still_hits_margin() {
    let solver = PriceSolver::new();
    let bulky = ItemEconomics::new(dec!(1500000), dec!(0), dec!(0), dec!(0), dec!(0)).unwrap();
    let schedule = ebay_schedule();
    let tariff = EffectiveTariff {
        duty_rate: Decimal::ZERO,
        tax_rate: Decimal::ZERO,
        duty_free_threshold: Decimal::ZERO,
        declared_shipping_cap: None,
    };

    let price = solver
        .solve_target_margin(&bulky, dec!(25), &schedule, &tariff, dec!(157.5), DutyRegime::Ddu)
        .unwrap();
    assert_eq!(schedule.tier_index(price), 1, "price {} should land past the 7500 boundary", price);

    let quote = solver
        .evaluate(&bulky, price, Decimal::ZERO, &schedule, &tariff, dec!(157.5), DutyRegime::Ddu)
        .unwrap();
    assert!((quote.margin_percent - dec!(25)).abs() < dec!(0.01));
}

#[test]
fn test_degenerate_revenue_reports_zero_margin() {
    let solver = PriceSolver::new();
    let economics =
        ItemEconomics::new(dec!(80000), dec!(500), dec!(200), dec!(500), dec!(0)).unwrap();
    let quote = solver
        .evaluate(
            &economics,
            Decimal::ZERO,
            Decimal::ZERO,
            &ebay_schedule(),
            &tariff(750, 0),
            dec!(157.5),
            DutyRegime::Ddp,
        )
        .unwrap();

    assert_eq!(quote.margin_percent, Decimal::ZERO);
    assert!(quote.profit_domestic < Decimal::ZERO);
}
