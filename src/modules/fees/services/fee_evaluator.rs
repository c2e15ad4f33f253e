use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::fees::models::MarketplaceFeeSchedule;

/// FeeEvaluator computes marketplace fees against a tiered schedule.
///
/// Commission is marginal: each tier's rate applies only to the slice of
/// the price falling inside that tier, so the total is continuous and
/// non-decreasing in price with no jump at tier boundaries.
pub struct FeeEvaluator;

impl FeeEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Commission on `price`, accumulated slice by slice across the tiers
    pub fn commission(&self, schedule: &MarketplaceFeeSchedule, price: Decimal) -> Result<Decimal> {
        Self::reject_negative(price, "price")?;

        let mut amount = Decimal::ZERO;
        let mut slice_start = Decimal::ZERO;

        for tier in &schedule.tiers {
            let slice_end = match tier.upper_bound {
                Some(bound) => bound.min(price),
                None => price,
            };

            if slice_end > slice_start {
                amount += (slice_end - slice_start) * tier.rate;
            }

            match tier.upper_bound {
                Some(bound) if bound < price => slice_start = bound,
                _ => break,
            }
        }

        Ok(amount)
    }

    /// Payment-processor fee: `revenue * rate + fixed`
    pub fn payment_fee(
        &self,
        schedule: &MarketplaceFeeSchedule,
        revenue: Decimal,
    ) -> Result<Decimal> {
        Self::reject_negative(revenue, "revenue")?;
        Ok(revenue * schedule.payment_fee.rate + schedule.payment_fee.fixed_fee)
    }

    /// Commission + payment fee + flat per-order fee
    pub fn total_fees(&self, schedule: &MarketplaceFeeSchedule, price: Decimal) -> Result<Decimal> {
        let commission = self.commission(schedule, price)?;
        let payment = self.payment_fee(schedule, price)?;
        Ok(commission + payment + schedule.per_order_fee)
    }

    /// Commission restricted to one tier is affine in price:
    /// `commission(p) = rate * p + offset` for any `p` inside that tier.
    /// Returns `(rate, offset)`; the inverse solver uses this to re-derive
    /// a trial price once it knows which tier the price lands in.
    pub fn commission_affine(
        &self,
        schedule: &MarketplaceFeeSchedule,
        tier_index: usize,
    ) -> (Decimal, Decimal) {
        let mut below = Decimal::ZERO;
        let mut slice_start = Decimal::ZERO;

        for tier in schedule.tiers.iter().take(tier_index) {
            // validate() guarantees every tier before the last is bounded
            let bound = tier.upper_bound.unwrap_or(slice_start);
            below += (bound - slice_start) * tier.rate;
            slice_start = bound;
        }

        let rate = schedule.tiers[tier_index].rate;
        let lower = schedule.tier_lower_bound(tier_index);
        (rate, below - rate * lower)
    }

    fn reject_negative(value: Decimal, what: &str) -> Result<()> {
        if value < Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Cannot evaluate fees for negative {}: {}",
                what, value
            )));
        }
        Ok(())
    }
}

impl Default for FeeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
