// Exchange module: FX quotes and safe-rate conversion

pub mod models;
pub mod services;

pub use models::ExchangeQuote;
pub use services::{RateConverter, ExchangeRateProvider, StaticRateProvider};
