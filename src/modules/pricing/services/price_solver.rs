use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::fees::models::MarketplaceFeeSchedule;
use crate::modules::fees::services::FeeEvaluator;
use crate::modules::pricing::models::{BreakdownLine, DutyRegime, ItemEconomics, PriceQuote};
use crate::modules::tariffs::models::EffectiveTariff;
use crate::modules::tariffs::services::TariffResolver;

/// Iteration cap for the inverse solver. Tier matching stabilizes in at
/// most one step per tier on sane schedules; hitting the cap means the
/// schedule is pathological.
const MAX_ITERATIONS: u32 = 10;

/// PriceSolver projects profit for a given sale price (forward) and solves
/// for the price that hits a target margin (inverse).
///
/// Inverse solving cannot use a single closed-form expression because
/// commission is piecewise-linear in price: a solution derived under one
/// tier's rate may land in a different tier. The solver re-derives with the
/// landed tier's affine form until assumption and outcome agree.
pub struct PriceSolver {
    fees: FeeEvaluator,
    tariffs: TariffResolver,
}

impl PriceSolver {
    pub fn new() -> Self {
        Self {
            fees: FeeEvaluator::new(),
            tariffs: TariffResolver::new(),
        }
    }

    /// Project profit for one sale price under one duty regime.
    ///
    /// Under DDP the full revenue is the taxable basis; under DDU the buyer
    /// settles duty and tax at import, so the basis is zero and neither
    /// appears as a seller cost.
    pub fn evaluate(
        &self,
        economics: &ItemEconomics,
        price: Decimal,
        shipping_price: Decimal,
        schedule: &MarketplaceFeeSchedule,
        tariff: &EffectiveTariff,
        exchange_rate: Decimal,
        regime: DutyRegime,
    ) -> Result<PriceQuote> {
        economics.validate()?;
        schedule.validate()?;
        Self::require_non_negative(price, "price")?;
        Self::require_non_negative(shipping_price, "shipping price")?;
        Self::require_positive_rate(exchange_rate)?;

        let revenue = price + shipping_price;

        let taxable_basis = if regime.duties_included_in_price() {
            revenue
        } else {
            Decimal::ZERO
        };
        let (duty, tax) = self.tariffs.duty_and_tax(tariff, taxable_basis);

        let commission = self.fees.commission(schedule, revenue)?;
        let payment_fee = self.fees.payment_fee(schedule, revenue)?;
        let total_fees = commission + payment_fee + schedule.per_order_fee;

        let net_foreign = revenue - duty - tax - total_fees;
        let net_domestic = net_foreign * exchange_rate;
        let total_cost_domestic = economics.total_cost();
        let profit_domestic = net_domestic - total_cost_domestic;

        // Degenerate revenue is reported as 0% margin, not an error
        let margin_percent = if net_domestic > Decimal::ZERO {
            profit_domestic / net_domestic * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let roi_percent = if total_cost_domestic > Decimal::ZERO {
            profit_domestic / total_cost_domestic * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let taxable = (taxable_basis - tariff.duty_free_threshold).max(Decimal::ZERO);
        let breakdown = vec![
            BreakdownLine::new(
                "revenue",
                revenue,
                format!("price {} + shipping {} = {}", price, shipping_price, revenue),
            ),
            BreakdownLine::new(
                "total cost",
                total_cost_domestic,
                format!(
                    "purchase {} + outsource {} + packaging {} + domestic shipping {} + international shipping {} = {}",
                    economics.purchase_cost,
                    economics.outsource_fee,
                    economics.packaging_fee,
                    economics.domestic_shipping,
                    economics.international_shipping,
                    total_cost_domestic
                ),
            ),
            BreakdownLine::new(
                "duty",
                duty,
                format!(
                    "max(0, basis {} - threshold {}) * duty rate {} = {}",
                    taxable_basis, tariff.duty_free_threshold, tariff.duty_rate, duty
                ),
            ),
            BreakdownLine::new(
                "tax",
                tax,
                format!(
                    "(taxable {} + duty {}) * tax rate {} = {}",
                    taxable, duty, tariff.tax_rate, tax
                ),
            ),
            BreakdownLine::new(
                "fees",
                total_fees,
                format!(
                    "commission {} + payment fee {} + per-order fee {} = {}",
                    commission, payment_fee, schedule.per_order_fee, total_fees
                ),
            ),
            BreakdownLine::new(
                "net profit",
                profit_domestic,
                format!(
                    "net foreign {} * rate {} - cost {} = {}",
                    net_foreign, exchange_rate, total_cost_domestic, profit_domestic
                ),
            ),
        ];

        Ok(PriceQuote {
            duty_regime: regime,
            sell_price: price,
            shipping_price,
            revenue,
            duty,
            tax,
            commission,
            payment_fee,
            per_order_fee: schedule.per_order_fee,
            total_fees,
            net_foreign,
            net_domestic,
            total_cost_domestic,
            profit_domestic,
            margin_percent,
            roi_percent,
            breakdown,
        })
    }

    /// Solve for the sale price that yields `target_margin_percent`.
    ///
    /// Within one commission tier the whole equation is affine in price, so
    /// each step solves exactly under an assumed (tier, above-threshold)
    /// state, then checks which state the trial price actually lands in.
    /// Assuming only the lowest tier would systematically misprice anything
    /// that crosses a tier boundary.
    pub fn solve_target_margin(
        &self,
        economics: &ItemEconomics,
        target_margin_percent: Decimal,
        schedule: &MarketplaceFeeSchedule,
        tariff: &EffectiveTariff,
        exchange_rate: Decimal,
        regime: DutyRegime,
    ) -> Result<Decimal> {
        economics.validate()?;
        schedule.validate()?;
        Self::require_positive_rate(exchange_rate)?;

        if target_margin_percent < Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Target margin cannot be negative, got {}",
                target_margin_percent
            )));
        }
        if target_margin_percent >= Decimal::ONE_HUNDRED {
            return Err(AppError::invalid_input(format!(
                "Target margin must be below 100%, got {}",
                target_margin_percent
            )));
        }

        // margin m fixes net revenue: net_domestic = cost / (1 - m/100)
        let margin_fraction = target_margin_percent / Decimal::ONE_HUNDRED;
        let required_net_foreign =
            economics.total_cost() / exchange_rate / (Decimal::ONE - margin_fraction);

        let burden = if regime.duties_included_in_price() {
            tariff.proportional_burden()
        } else {
            Decimal::ZERO
        };
        let threshold = tariff.duty_free_threshold;
        let fixed_fees = schedule.payment_fee.fixed_fee + schedule.per_order_fee;

        let mut tier = 0usize;
        let mut above_threshold = burden > Decimal::ZERO;
        let mut trial = Decimal::ZERO;

        for iteration in 1..=MAX_ITERATIONS {
            let (commission_rate, commission_offset) =
                self.fees.commission_affine(schedule, tier);
            let effective_burden = if above_threshold {
                burden
            } else {
                Decimal::ZERO
            };

            let denominator = Decimal::ONE
                - effective_burden
                - commission_rate
                - schedule.payment_fee.rate;

            if denominator <= Decimal::ZERO {
                return Err(AppError::NonConvergent {
                    reason: "combined fee and tax rates reach 100% of price".to_string(),
                    iterations: iteration,
                    last_price: trial,
                    last_tier: tier,
                });
            }

            let numerator = required_net_foreign
                + fixed_fees
                + commission_offset
                - effective_burden * threshold;
            trial = numerator / denominator;

            let landed_tier = schedule.tier_index(trial);
            let landed_above = burden > Decimal::ZERO && trial > threshold;

            debug!(
                iteration,
                trial = %trial,
                assumed_tier = tier,
                landed_tier,
                "Inverse solver iteration"
            );

            if landed_tier == tier && landed_above == above_threshold {
                if trial < Decimal::ZERO {
                    return Err(AppError::invalid_input(format!(
                        "No non-negative price reaches a {}% margin with this schedule",
                        target_margin_percent
                    )));
                }
                return Ok(trial);
            }

            tier = landed_tier;
            above_threshold = landed_above;
        }

        Err(AppError::NonConvergent {
            reason: "tier assignment did not stabilize".to_string(),
            iterations: MAX_ITERATIONS,
            last_price: trial,
            last_tier: tier,
        })
    }

    fn require_non_negative(value: Decimal, what: &str) -> Result<()> {
        if value < Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "{} cannot be negative, got {}",
                what, value
            )));
        }
        Ok(())
    }

    fn require_positive_rate(exchange_rate: Decimal) -> Result<()> {
        if exchange_rate <= Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Exchange rate must be positive, got {}",
                exchange_rate
            )));
        }
        Ok(())
    }
}

impl Default for PriceSolver {
    fn default() -> Self {
        Self::new()
    }
}
