use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::fees::models::{CommissionTier, MarketplaceFeeSchedule, PaymentProcessorFee};

/// Read-only source of commission schedules, injected into each computation
/// so the engine never reaches into a live store
#[async_trait]
pub trait FeeScheduleProvider: Send + Sync {
    /// Schedule for a (marketplace, category) pair, falling back to the
    /// provider's default schedule when no exact entry exists.
    /// `MissingRule` only when there is no fallback either.
    async fn schedule_for(
        &self,
        marketplace: &str,
        category: &str,
    ) -> Result<MarketplaceFeeSchedule>;
}

/// In-memory schedule table with an optional fallback default
pub struct InMemoryFeeScheduleRepository {
    schedules: HashMap<(String, String), MarketplaceFeeSchedule>,
    fallback: Option<MarketplaceFeeSchedule>,
}

impl InMemoryFeeScheduleRepository {
    pub fn new() -> Self {
        Self {
            schedules: HashMap::new(),
            fallback: None,
        }
    }

    /// Table the binary ships with, so quotes work without a rule database.
    ///
    /// Fallback schedule: flat 10% commission, 3% + 0.30 payment fee. Any
    /// marketplace/category without an entry resolves to that.
    pub fn seeded() -> Result<Self> {
        let ebay_payment = PaymentProcessorFee {
            rate: Decimal::new(349, 4),      // 3.49%
            fixed_fee: Decimal::new(49, 2),  // 0.49
        };

        let repo = Self::new()
            .with_schedule(MarketplaceFeeSchedule::new(
                "ebay",
                "electronics",
                vec![
                    CommissionTier {
                        upper_bound: Some(Decimal::new(7500, 0)),
                        rate: Decimal::new(129, 3), // 12.9% up to 7,500
                    },
                    CommissionTier {
                        upper_bound: None,
                        rate: Decimal::new(235, 4), // 2.35% above
                    },
                ],
                Decimal::ZERO,
                ebay_payment.clone(),
            )?)
            .with_schedule(MarketplaceFeeSchedule::new(
                "ebay",
                "collectibles",
                vec![
                    CommissionTier {
                        upper_bound: Some(Decimal::new(7500, 0)),
                        rate: Decimal::new(1335, 4), // 13.35% up to 7,500
                    },
                    CommissionTier {
                        upper_bound: None,
                        rate: Decimal::new(235, 4),
                    },
                ],
                Decimal::ZERO,
                ebay_payment,
            )?)
            .with_schedule(MarketplaceFeeSchedule::flat(
                "amazon",
                "electronics",
                Decimal::new(8, 2), // 8% referral
                Decimal::new(99, 2),
                PaymentProcessorFee {
                    rate: Decimal::ZERO,
                    fixed_fee: Decimal::ZERO,
                },
            )?)
            .with_fallback(MarketplaceFeeSchedule::flat(
                "default",
                "default",
                Decimal::new(10, 2),
                Decimal::ZERO,
                PaymentProcessorFee {
                    rate: Decimal::new(3, 2),
                    fixed_fee: Decimal::new(30, 2),
                },
            )?);

        Ok(repo)
    }

    pub fn with_schedule(mut self, schedule: MarketplaceFeeSchedule) -> Self {
        let key = Self::key(&schedule.marketplace, &schedule.category);
        self.schedules.insert(key, schedule);
        self
    }

    pub fn with_fallback(mut self, schedule: MarketplaceFeeSchedule) -> Self {
        self.fallback = Some(schedule);
        self
    }

    fn key(marketplace: &str, category: &str) -> (String, String) {
        (marketplace.to_lowercase(), category.to_lowercase())
    }
}

impl Default for InMemoryFeeScheduleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeeScheduleProvider for InMemoryFeeScheduleRepository {
    async fn schedule_for(
        &self,
        marketplace: &str,
        category: &str,
    ) -> Result<MarketplaceFeeSchedule> {
        if let Some(schedule) = self.schedules.get(&Self::key(marketplace, category)) {
            return Ok(schedule.clone());
        }

        if let Some(fallback) = &self.fallback {
            warn!(
                marketplace = %marketplace,
                category = %category,
                "No fee schedule for marketplace/category, using fallback schedule"
            );
            return Ok(fallback.clone());
        }

        Err(AppError::missing_rule(format!(
            "No fee schedule for {}/{} and no fallback configured",
            marketplace, category
        )))
    }
}
