use rust_decimal::Decimal;
use tracing::debug;

use crate::core::Result;
use crate::modules::tariffs::models::{EffectiveTariff, TariffRule};

/// TariffResolver turns a stored rule into the rates that apply to one
/// shipment and computes the resulting duty and tax amounts.
pub struct TariffResolver;

impl TariffResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a rule against a declared country of origin.
    ///
    /// When the origin matches the rule's trade agreement, the duty rate is
    /// reduced by the agreement amount, clamped at zero. Tax rate and
    /// duty-free threshold pass through unchanged.
    pub fn resolve(&self, rule: &TariffRule, origin_country: &str) -> Result<EffectiveTariff> {
        rule.validate()?;

        let duty_rate = match &rule.agreement {
            Some(agreement)
                if agreement.origin_country.eq_ignore_ascii_case(origin_country) =>
            {
                let reduced = (rule.duty_rate - agreement.duty_reduction).max(Decimal::ZERO);
                debug!(
                    jurisdiction = %rule.jurisdiction,
                    origin = %origin_country,
                    base_rate = %rule.duty_rate,
                    reduced_rate = %reduced,
                    "Applying trade agreement duty reduction"
                );
                reduced
            }
            _ => rule.duty_rate,
        };

        Ok(EffectiveTariff {
            duty_rate,
            tax_rate: rule.tax_rate,
            duty_free_threshold: rule.duty_free_threshold,
            declared_shipping_cap: rule.declared_shipping_cap,
        })
    }

    /// Duty and tax on a taxable basis.
    ///
    /// Only the value above the duty-free threshold is taxable. Tax is
    /// charged on the duty-inclusive amount; that ordering follows the
    /// destination customs convention and must not be swapped.
    pub fn duty_and_tax(
        &self,
        effective: &EffectiveTariff,
        taxable_basis: Decimal,
    ) -> (Decimal, Decimal) {
        let taxable = (taxable_basis - effective.duty_free_threshold).max(Decimal::ZERO);
        let duty = taxable * effective.duty_rate;
        let tax = (taxable + duty) * effective.tax_rate;
        (duty, tax)
    }
}

impl Default for TariffResolver {
    fn default() -> Self {
        Self::new()
    }
}
