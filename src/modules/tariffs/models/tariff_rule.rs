use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Duty-rate reduction granted under a trade agreement when the declared
/// country of origin matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAgreement {
    /// ISO country code the goods must be declared as originating from
    pub origin_country: String,

    /// Amount subtracted from the duty rate, as a fraction
    pub duty_reduction: Decimal,
}

/// Import duty and consumption tax rule for one
/// (destination jurisdiction, item classification) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffRule {
    pub jurisdiction: String,
    pub classification: String,

    /// Import duty rate, as a fraction of the taxable amount
    pub duty_rate: Decimal,

    /// Consumption tax (VAT/GST/sales tax) rate, as a fraction
    pub tax_rate: Decimal,

    /// Shipment value (foreign currency) below which no duty or tax applies
    pub duty_free_threshold: Decimal,

    pub agreement: Option<TradeAgreement>,

    /// Marketplace ceiling on the declared shipping price for this
    /// destination, if one applies
    pub declared_shipping_cap: Option<Decimal>,
}

impl TariffRule {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [("duty", self.duty_rate), ("tax", self.tax_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(AppError::invalid_input(format!(
                    "{} rate must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        if self.duty_free_threshold < Decimal::ZERO {
            return Err(AppError::invalid_input(format!(
                "Duty-free threshold cannot be negative, got {}",
                self.duty_free_threshold
            )));
        }

        if let Some(agreement) = &self.agreement {
            if agreement.duty_reduction < Decimal::ZERO || agreement.duty_reduction > Decimal::ONE {
                return Err(AppError::invalid_input(format!(
                    "Trade agreement reduction must be within [0, 1], got {}",
                    agreement.duty_reduction
                )));
            }
        }

        Ok(())
    }
}

/// The rates that actually apply to one shipment, after any trade-agreement
/// adjustment has been resolved against the declared origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveTariff {
    pub duty_rate: Decimal,
    pub tax_rate: Decimal,
    pub duty_free_threshold: Decimal,
    pub declared_shipping_cap: Option<Decimal>,
}

impl EffectiveTariff {
    /// A tariff that charges nothing, used for DDU listings where the buyer
    /// settles duty and tax at import
    pub fn zero() -> Self {
        Self {
            duty_rate: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            duty_free_threshold: Decimal::ZERO,
            declared_shipping_cap: None,
        }
    }

    /// Fraction of each taxable unit of revenue consumed by duty plus
    /// duty-inclusive tax: `d + t + d*t`. Above the duty-free threshold,
    /// `duty + tax = burden * (basis - threshold)`.
    pub fn proportional_burden(&self) -> Decimal {
        self.duty_rate + self.tax_rate + self.duty_rate * self.tax_rate
    }
}
