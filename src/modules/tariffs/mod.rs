// Tariffs module: import duty / consumption tax rules per destination

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{EffectiveTariff, TariffRule, TradeAgreement};
pub use repositories::{InMemoryTariffRepository, TariffRuleProvider};
pub use services::TariffResolver;
