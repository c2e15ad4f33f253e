use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::tariffs::models::{TariffRule, TradeAgreement};

/// Read-only source of tariff rules, injected into each computation.
///
/// Resolution walks a three-level chain:
/// 1. exact (jurisdiction, classification) rule
/// 2. the jurisdiction's default rule
/// 3. the provider's global default rule
///
/// A resolved fallback is logged, not an error; `MissingRule` is returned
/// only when the whole chain comes up empty.
#[async_trait]
pub trait TariffRuleProvider: Send + Sync {
    async fn rule_for(&self, jurisdiction: &str, classification: &str) -> Result<TariffRule>;
}

/// In-memory rule table with per-jurisdiction and global defaults
pub struct InMemoryTariffRepository {
    rules: HashMap<(String, String), TariffRule>,
    jurisdiction_defaults: HashMap<String, TariffRule>,
    global_default: Option<TariffRule>,
}

impl InMemoryTariffRepository {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            jurisdiction_defaults: HashMap::new(),
            global_default: None,
        }
    }

    /// Table the binary ships with. Rates are indicative, not tax advice;
    /// operators load their own rules for anything that matters.
    ///
    /// Global default: 5% duty, 10% consumption tax, no threshold.
    pub fn seeded() -> Self {
        let mut repo = Self::new();

        // US: no federal VAT, 800 USD de minimis
        repo = repo
            .with_rule(TariffRule {
                jurisdiction: "us".to_string(),
                classification: "electronics".to_string(),
                duty_rate: Decimal::new(75, 3), // 7.5%
                tax_rate: Decimal::ZERO,
                duty_free_threshold: Decimal::new(800, 0),
                agreement: None,
                declared_shipping_cap: Some(Decimal::new(50, 0)),
            })
            .with_jurisdiction_default(TariffRule {
                jurisdiction: "us".to_string(),
                classification: "default".to_string(),
                duty_rate: Decimal::new(3, 2),
                tax_rate: Decimal::ZERO,
                duty_free_threshold: Decimal::new(800, 0),
                agreement: None,
                declared_shipping_cap: Some(Decimal::new(50, 0)),
            });

        // Germany: EPA origin reduction for Japanese goods, 19% VAT from
        // the first euro
        repo = repo
            .with_rule(TariffRule {
                jurisdiction: "de".to_string(),
                classification: "electronics".to_string(),
                duty_rate: Decimal::new(32, 3), // 3.2%
                tax_rate: Decimal::new(19, 2),
                duty_free_threshold: Decimal::ZERO,
                agreement: Some(TradeAgreement {
                    origin_country: "JP".to_string(),
                    duty_reduction: Decimal::new(32, 3),
                }),
                declared_shipping_cap: Some(Decimal::new(35, 0)),
            })
            .with_jurisdiction_default(TariffRule {
                jurisdiction: "de".to_string(),
                classification: "default".to_string(),
                duty_rate: Decimal::new(37, 3),
                tax_rate: Decimal::new(19, 2),
                duty_free_threshold: Decimal::ZERO,
                agreement: None,
                declared_shipping_cap: Some(Decimal::new(35, 0)),
            });

        // UK: 135 GBP-equivalent threshold, 20% VAT
        repo = repo.with_rule(TariffRule {
            jurisdiction: "uk".to_string(),
            classification: "electronics".to_string(),
            duty_rate: Decimal::new(2, 2),
            tax_rate: Decimal::new(20, 2),
            duty_free_threshold: Decimal::new(135, 0),
            agreement: Some(TradeAgreement {
                origin_country: "JP".to_string(),
                duty_reduction: Decimal::new(2, 2),
            }),
            declared_shipping_cap: None,
        });

        repo.with_global_default(TariffRule {
            jurisdiction: "default".to_string(),
            classification: "default".to_string(),
            duty_rate: Decimal::new(5, 2),
            tax_rate: Decimal::new(10, 2),
            duty_free_threshold: Decimal::ZERO,
            agreement: None,
            declared_shipping_cap: None,
        })
    }

    pub fn with_rule(mut self, rule: TariffRule) -> Self {
        let key = Self::key(&rule.jurisdiction, &rule.classification);
        self.rules.insert(key, rule);
        self
    }

    pub fn with_jurisdiction_default(mut self, rule: TariffRule) -> Self {
        self.jurisdiction_defaults
            .insert(rule.jurisdiction.to_lowercase(), rule);
        self
    }

    pub fn with_global_default(mut self, rule: TariffRule) -> Self {
        self.global_default = Some(rule);
        self
    }

    fn key(jurisdiction: &str, classification: &str) -> (String, String) {
        (jurisdiction.to_lowercase(), classification.to_lowercase())
    }
}

impl Default for InMemoryTariffRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TariffRuleProvider for InMemoryTariffRepository {
    async fn rule_for(&self, jurisdiction: &str, classification: &str) -> Result<TariffRule> {
        if let Some(rule) = self.rules.get(&Self::key(jurisdiction, classification)) {
            return Ok(rule.clone());
        }

        if let Some(rule) = self.jurisdiction_defaults.get(&jurisdiction.to_lowercase()) {
            warn!(
                jurisdiction = %jurisdiction,
                classification = %classification,
                "No tariff rule for classification, using jurisdiction default"
            );
            return Ok(rule.clone());
        }

        if let Some(rule) = &self.global_default {
            warn!(
                jurisdiction = %jurisdiction,
                classification = %classification,
                "No tariff rule for jurisdiction, using global default"
            );
            return Ok(rule.clone());
        }

        Err(AppError::missing_rule(format!(
            "No tariff rule for {}/{} and no default configured",
            jurisdiction, classification
        )))
    }
}
