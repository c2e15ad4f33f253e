use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// One commission tier: the rate charged on the slice of price up to
/// `upper_bound`. The last tier is open-ended (`upper_bound = None`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionTier {
    /// Exclusive upper bound of this tier's price slice; `None` means +inf
    pub upper_bound: Option<Decimal>,

    /// Commission rate applied to this slice, as a fraction (0.129 = 12.9%)
    pub rate: Decimal,
}

/// Payment-processor fee: a rate on revenue plus a fixed per-payment fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProcessorFee {
    pub rate: Decimal,
    pub fixed_fee: Decimal,
}

/// Commission schedule for one (marketplace, category) pair.
///
/// Tiers are marginal: the first tier's rate applies up to its bound, the
/// next tier's rate applies only to the slice above it, and so on. The tier
/// list partitions `[0, inf)` with no gaps or overlaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceFeeSchedule {
    pub marketplace: String,
    pub category: String,
    pub tiers: Vec<CommissionTier>,
    /// Flat fee charged once per order
    pub per_order_fee: Decimal,
    pub payment_fee: PaymentProcessorFee,
}

impl MarketplaceFeeSchedule {
    pub fn new(
        marketplace: impl Into<String>,
        category: impl Into<String>,
        tiers: Vec<CommissionTier>,
        per_order_fee: Decimal,
        payment_fee: PaymentProcessorFee,
    ) -> Result<Self> {
        let schedule = Self {
            marketplace: marketplace.into(),
            category: category.into(),
            tiers,
            per_order_fee,
            payment_fee,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Single-tier schedule, the common case for flat-rate marketplaces
    pub fn flat(
        marketplace: impl Into<String>,
        category: impl Into<String>,
        rate: Decimal,
        per_order_fee: Decimal,
        payment_fee: PaymentProcessorFee,
    ) -> Result<Self> {
        Self::new(
            marketplace,
            category,
            vec![CommissionTier {
                upper_bound: None,
                rate,
            }],
            per_order_fee,
            payment_fee,
        )
    }

    /// Check the tier list partitions `[0, inf)`: bounds strictly
    /// increasing, only the last tier open-ended, all rates non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(AppError::invalid_input(
                "Fee schedule must have at least one commission tier",
            ));
        }

        let mut previous_bound = Decimal::ZERO;
        let last = self.tiers.len() - 1;

        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.rate < Decimal::ZERO {
                return Err(AppError::invalid_input(format!(
                    "Commission tier {} has a negative rate: {}",
                    i, tier.rate
                )));
            }

            match tier.upper_bound {
                Some(bound) => {
                    if i == last {
                        return Err(AppError::invalid_input(
                            "Last commission tier must be open-ended",
                        ));
                    }
                    if bound <= previous_bound {
                        return Err(AppError::invalid_input(format!(
                            "Commission tier bounds must be strictly increasing ({} after {})",
                            bound, previous_bound
                        )));
                    }
                    previous_bound = bound;
                }
                None => {
                    if i != last {
                        return Err(AppError::invalid_input(
                            "Only the last commission tier may be open-ended",
                        ));
                    }
                }
            }
        }

        if self.per_order_fee < Decimal::ZERO {
            return Err(AppError::invalid_input("Per-order fee cannot be negative"));
        }

        if self.payment_fee.rate < Decimal::ZERO || self.payment_fee.fixed_fee < Decimal::ZERO {
            return Err(AppError::invalid_input(
                "Payment processor fee components cannot be negative",
            ));
        }

        Ok(())
    }

    /// Index of the tier whose slice contains `price`
    pub fn tier_index(&self, price: Decimal) -> usize {
        for (i, tier) in self.tiers.iter().enumerate() {
            match tier.upper_bound {
                Some(bound) if price > bound => continue,
                _ => return i,
            }
        }
        self.tiers.len() - 1
    }

    /// Inclusive lower bound of a tier's slice (0 for the first tier)
    pub fn tier_lower_bound(&self, index: usize) -> Decimal {
        if index == 0 {
            Decimal::ZERO
        } else {
            self.tiers[index - 1]
                .upper_bound
                .unwrap_or(Decimal::ZERO)
        }
    }
}
