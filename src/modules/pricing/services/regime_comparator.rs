use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::Result;
use crate::modules::fees::models::MarketplaceFeeSchedule;
use crate::modules::pricing::models::{
    Competitiveness, CouponStrategy, DualRegimeResult, DutyRegime, ItemEconomics,
};
use crate::modules::pricing::services::PriceSolver;
use crate::modules::tariffs::models::TariffRule;
use crate::modules::tariffs::services::TariffResolver;

/// Business heuristics for grading the DDP/DDU price gap. The bands and the
/// discount formula are operator policy, not arithmetic truths, so they are
/// carried as data.
#[derive(Debug, Clone)]
pub struct StrategyThresholds {
    /// Delta percent at or below which the DDP listing competes outright
    pub excellent_max_percent: Decimal,
    pub good_max_percent: Decimal,
    /// Upper edge of the band where a coupon can still close the gap
    pub fair_max_percent: Decimal,
    /// Ceiling on any recommended coupon discount
    pub max_discount_percent: Decimal,
}

impl Default for StrategyThresholds {
    fn default() -> Self {
        Self {
            excellent_max_percent: Decimal::new(5, 0),
            good_max_percent: Decimal::new(10, 0),
            fair_max_percent: Decimal::new(15, 0),
            max_discount_percent: Decimal::new(10, 0),
        }
    }
}

/// RegimeComparator prices the same item under DDU and DDP and grades the
/// gap into a listing-strategy recommendation.
pub struct RegimeComparator {
    solver: PriceSolver,
    tariffs: TariffResolver,
    thresholds: StrategyThresholds,
}

impl RegimeComparator {
    pub fn new() -> Self {
        Self::with_thresholds(StrategyThresholds::default())
    }

    pub fn with_thresholds(thresholds: StrategyThresholds) -> Self {
        Self {
            solver: PriceSolver::new(),
            tariffs: TariffResolver::new(),
            thresholds,
        }
    }

    /// Price one item under both duty regimes at the same target margin.
    ///
    /// The DDP side additionally honors the destination's declared-shipping
    /// ceiling: any estimated shipping above the cap is folded into the
    /// product price and the quote re-evaluated, since marketplaces reject
    /// listings that declare more shipping than the cap allows.
    #[allow(clippy::too_many_arguments)]
    pub fn compare(
        &self,
        economics: &ItemEconomics,
        schedule: &MarketplaceFeeSchedule,
        rule: &TariffRule,
        origin_country: &str,
        exchange_rate: Decimal,
        target_margin_percent: Decimal,
        estimated_shipping: Decimal,
    ) -> Result<DualRegimeResult> {
        let effective = self.tariffs.resolve(rule, origin_country)?;

        let ddu_price = self.solver.solve_target_margin(
            economics,
            target_margin_percent,
            schedule,
            &effective,
            exchange_rate,
            DutyRegime::Ddu,
        )?;
        let ddu = self.solver.evaluate(
            economics,
            ddu_price,
            estimated_shipping,
            schedule,
            &effective,
            exchange_rate,
            DutyRegime::Ddu,
        )?;

        let ddp_price = self.solver.solve_target_margin(
            economics,
            target_margin_percent,
            schedule,
            &effective,
            exchange_rate,
            DutyRegime::Ddp,
        )?;
        let mut ddp = self.solver.evaluate(
            economics,
            ddp_price,
            estimated_shipping,
            schedule,
            &effective,
            exchange_rate,
            DutyRegime::Ddp,
        )?;

        if let Some(cap) = effective.declared_shipping_cap {
            if estimated_shipping > cap {
                let excess = estimated_shipping - cap;
                debug!(
                    cap = %cap,
                    estimated = %estimated_shipping,
                    excess = %excess,
                    "Declared shipping exceeds destination cap, folding excess into price"
                );
                ddp = self.solver.evaluate(
                    economics,
                    ddp_price + excess,
                    cap,
                    schedule,
                    &effective,
                    exchange_rate,
                    DutyRegime::Ddp,
                )?;
            }
        }

        let price_delta = ddp.sell_price - ddu.sell_price;
        let delta_percent = if ddu.sell_price > Decimal::ZERO {
            price_delta / ddu.sell_price * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let competitiveness = self.classify(delta_percent);
        let coupon = self.coupon_strategy(delta_percent, rule);

        info!(
            marketplace = %schedule.marketplace,
            jurisdiction = %rule.jurisdiction,
            ddu_price = %ddu.sell_price,
            ddp_price = %ddp.sell_price,
            delta_percent = %delta_percent,
            competitiveness = %competitiveness,
            "Compared duty regimes"
        );

        Ok(DualRegimeResult {
            ddu,
            ddp,
            price_delta,
            delta_percent,
            competitiveness,
            coupon,
        })
    }

    fn classify(&self, delta_percent: Decimal) -> Competitiveness {
        if delta_percent <= self.thresholds.excellent_max_percent {
            Competitiveness::Excellent
        } else if delta_percent <= self.thresholds.good_max_percent {
            Competitiveness::Good
        } else if delta_percent <= self.thresholds.fair_max_percent {
            Competitiveness::Fair
        } else {
            Competitiveness::Poor
        }
    }

    fn coupon_strategy(&self, delta_percent: Decimal, rule: &TariffRule) -> CouponStrategy {
        if delta_percent <= self.thresholds.excellent_max_percent {
            return CouponStrategy::NotRecommended {
                reason: "DDP price is already competitive with DDU listings".to_string(),
            };
        }

        if delta_percent <= self.thresholds.fair_max_percent {
            let discount_percent = (delta_percent / Decimal::TWO)
                .min(self.thresholds.max_discount_percent)
                .round_dp(1);
            return CouponStrategy::PercentageDiscount {
                discount_percent,
                target_markets: vec![rule.jurisdiction.clone()],
            };
        }

        CouponStrategy::ManualReview {
            reason: format!(
                "A {}% price gap is too large for coupon offsets; revisit sourcing or pricing",
                delta_percent.round_dp(1)
            ),
        }
    }
}

impl Default for RegimeComparator {
    fn default() -> Self {
        Self::new()
    }
}
