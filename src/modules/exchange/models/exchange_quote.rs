use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// A quoted exchange rate plus the operator's safety margin.
///
/// The base rate is expressed as domestic currency per 1 unit of foreign
/// currency (e.g. 150 JPY per USD). Quotes are supplied fresh per
/// computation and never mutated; staleness is the caller's concern and is
/// surfaced only through `quoted_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeQuote {
    /// Domestic currency of the rate (the cost side)
    pub domestic: Currency,

    /// Foreign currency of the rate (the marketplace side)
    pub foreign: Currency,

    /// Quoted market rate: domestic units per 1 foreign unit
    pub base_rate: Decimal,

    /// Safety margin in percent, added on top of the base rate so that
    /// intra-day FX drift does not eat the projected profit
    pub safety_margin_percent: Decimal,

    /// When the base rate was quoted
    pub quoted_at: DateTime<Utc>,
}

impl ExchangeQuote {
    pub fn new(
        domestic: Currency,
        foreign: Currency,
        base_rate: Decimal,
        safety_margin_percent: Decimal,
    ) -> Self {
        Self {
            domestic,
            foreign,
            base_rate,
            safety_margin_percent,
            quoted_at: Utc::now(),
        }
    }
}
