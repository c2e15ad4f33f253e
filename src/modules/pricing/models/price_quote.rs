use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who bears the destination duty and tax on a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyRegime {
    /// Delivered Duty Paid: the listing price includes duty and tax,
    /// the seller remits them
    #[serde(rename = "DDP")]
    Ddp,

    /// Delivered Duty Unpaid: the buyer settles duty and tax at import,
    /// they are not a seller cost
    #[serde(rename = "DDU")]
    Ddu,
}

impl DutyRegime {
    pub fn duties_included_in_price(&self) -> bool {
        matches!(self, DutyRegime::Ddp)
    }
}

impl fmt::Display for DutyRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyRegime::Ddp => write!(f, "DDP"),
            DutyRegime::Ddu => write!(f, "DDU"),
        }
    }
}

/// One labeled line of a quote's arithmetic, with the formula that
/// produced it, so a projection can be audited line by line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: Decimal,
    pub formula: String,
}

impl BreakdownLine {
    pub fn new(label: impl Into<String>, amount: Decimal, formula: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount,
            formula: formula.into(),
        }
    }
}

/// Full profit projection for one sale price under one duty regime.
///
/// Produced fresh by each solver invocation and immutable once returned.
/// Amounts keep full precision; rounding to display precision happens at
/// the presentation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub duty_regime: DutyRegime,

    /// Listing price, foreign currency
    pub sell_price: Decimal,

    /// Declared shipping price charged to the buyer, foreign currency
    pub shipping_price: Decimal,

    /// `sell_price + shipping_price`
    pub revenue: Decimal,

    pub duty: Decimal,
    pub tax: Decimal,
    pub commission: Decimal,
    pub payment_fee: Decimal,
    pub per_order_fee: Decimal,

    /// `commission + payment_fee + per_order_fee`
    pub total_fees: Decimal,

    /// Revenue net of duty, tax, and fees, foreign currency
    pub net_foreign: Decimal,

    /// `net_foreign` converted at the safe exchange rate
    pub net_domestic: Decimal,

    /// Acquisition cost total, domestic currency
    pub total_cost_domestic: Decimal,

    /// `net_domestic - total_cost_domestic`
    pub profit_domestic: Decimal,

    /// Profit over net revenue, percent; 0 when net revenue is not positive
    pub margin_percent: Decimal,

    /// Profit over acquisition cost, percent; 0 when cost is zero
    pub roi_percent: Decimal,

    pub breakdown: Vec<BreakdownLine>,
}
