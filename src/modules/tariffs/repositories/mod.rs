mod tariff_repository;

pub use tariff_repository::{InMemoryTariffRepository, TariffRuleProvider};
