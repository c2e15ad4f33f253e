use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::core::{AppError, Currency, Result};
use crate::modules::exchange::models::ExchangeQuote;

/// RateConverter turns a quoted base rate into the "safe" conversion rate
/// used for profit projection.
pub struct RateConverter;

impl RateConverter {
    pub fn new() -> Self {
        Self
    }

    /// Effective rate: `base * (1 + margin / 100)`.
    ///
    /// The base rate must be positive. A negative safety margin would mean
    /// the operator absorbs currency risk, which is disallowed.
    pub fn effective_rate(&self, base_rate: Decimal, margin_percent: Decimal) -> Result<Decimal> {
        if base_rate <= Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Exchange base rate must be positive, got {}",
                base_rate
            )));
        }

        if margin_percent < Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "FX safety margin cannot be negative, got {}",
                margin_percent
            )));
        }

        Ok(base_rate * (Decimal::ONE + margin_percent / Decimal::ONE_HUNDRED))
    }

    /// Effective rate straight off a quote
    pub fn effective_rate_for(&self, quote: &ExchangeQuote) -> Result<Decimal> {
        self.effective_rate(quote.base_rate, quote.safety_margin_percent)
    }
}

impl Default for RateConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of FX quotes for a (domestic, foreign) pair.
///
/// Rate fetching itself is outside the engine; implementations hand back
/// whatever rate table they were loaded with.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn quote(&self, domestic: Currency, foreign: Currency) -> Result<ExchangeQuote>;
}

/// Fixed rate table, loaded once at startup
pub struct StaticRateProvider {
    rates: HashMap<(Currency, Currency), ExchangeQuote>,
}

impl StaticRateProvider {
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    pub fn with_quote(mut self, quote: ExchangeQuote) -> Self {
        self.rates.insert((quote.domestic, quote.foreign), quote);
        self
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateProvider {
    async fn quote(&self, domestic: Currency, foreign: Currency) -> Result<ExchangeQuote> {
        self.rates
            .get(&(domestic, foreign))
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("No exchange quote for {}/{}", domestic, foreign))
            })
    }
}
