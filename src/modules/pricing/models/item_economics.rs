use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Immutable cost side of one item, all amounts in the domestic currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEconomics {
    /// What the item cost to buy domestically
    pub purchase_cost: Decimal,

    /// Outsourced-labor fee (inspection, cleaning, listing prep)
    pub outsource_fee: Decimal,

    /// Packaging materials
    pub packaging_fee: Decimal,

    /// Shipping from the supplier to the operator's hub
    pub domestic_shipping: Decimal,

    /// International shipping from the hub to the buyer, prepaid by the
    /// operator in domestic currency
    pub international_shipping: Decimal,
}

impl ItemEconomics {
    pub fn new(
        purchase_cost: Decimal,
        outsource_fee: Decimal,
        packaging_fee: Decimal,
        domestic_shipping: Decimal,
        international_shipping: Decimal,
    ) -> Result<Self> {
        let economics = Self {
            purchase_cost,
            outsource_fee,
            packaging_fee,
            domestic_shipping,
            international_shipping,
        };
        economics.validate()?;
        Ok(economics)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("purchase_cost", self.purchase_cost),
            ("outsource_fee", self.outsource_fee),
            ("packaging_fee", self.packaging_fee),
            ("domestic_shipping", self.domestic_shipping),
            ("international_shipping", self.international_shipping),
        ];

        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(AppError::invalid_input(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Total acquisition cost in domestic currency
    pub fn total_cost(&self) -> Decimal {
        self.purchase_cost
            + self.outsource_fee
            + self.packaging_fee
            + self.domestic_shipping
            + self.international_shipping
    }
}
