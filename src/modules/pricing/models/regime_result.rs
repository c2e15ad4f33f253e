use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::price_quote::PriceQuote;

/// How close the DDP price is to the DDU price, as a listing-competitiveness
/// grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Competitiveness {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for Competitiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competitiveness::Excellent => write!(f, "EXCELLENT"),
            Competitiveness::Good => write!(f, "GOOD"),
            Competitiveness::Fair => write!(f, "FAIR"),
            Competitiveness::Poor => write!(f, "POOR"),
        }
    }
}

/// Whether and how to offset the DDP premium with a coupon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CouponStrategy {
    /// The DDP price already competes with DDU listings
    NotRecommended { reason: String },

    /// Offer a percentage discount to buyers in markets where competing
    /// listings are DDU
    PercentageDiscount {
        discount_percent: Decimal,
        target_markets: Vec<String>,
    },

    /// The gap is too large for a coupon to close economically; the pricing
    /// strategy itself needs another look
    ManualReview { reason: String },
}

/// Side-by-side DDU and DDP projections for the same item, with the price
/// gap classified into a strategy recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualRegimeResult {
    pub ddu: PriceQuote,
    pub ddp: PriceQuote,

    /// `ddp.sell_price - ddu.sell_price`
    pub price_delta: Decimal,

    /// Delta relative to the DDU price, percent
    pub delta_percent: Decimal,

    pub competitiveness: Competitiveness,
    pub coupon: CouponStrategy,
}
