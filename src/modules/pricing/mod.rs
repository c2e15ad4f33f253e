// Pricing module: profit projection, inverse price solving, regime comparison

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{
    BreakdownLine, Competitiveness, CouponStrategy, DualRegimeResult, DutyRegime, ItemEconomics,
    PriceQuote,
};
pub use services::{PriceSolver, RegimeComparator, StrategyThresholds};
