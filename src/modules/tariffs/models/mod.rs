mod tariff_rule;

pub use tariff_rule::{EffectiveTariff, TariffRule, TradeAgreement};
