use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Defaults applied when a request omits the optional pricing knobs
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Safety margin added on top of the quoted FX base rate, in percent
    pub fx_safety_margin_percent: Decimal,
    /// Target profit margin used when a caller asks for a recommended
    /// price without specifying one, in percent
    pub default_target_margin_percent: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            pricing: PricingConfig {
                fx_safety_margin_percent: parse_decimal_env("FX_SAFETY_MARGIN_PERCENT", "5")?,
                default_target_margin_percent: parse_decimal_env(
                    "DEFAULT_TARGET_MARGIN_PERCENT",
                    "20",
                )?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.pricing.fx_safety_margin_percent < Decimal::ZERO {
            return Err(AppError::Configuration(
                "FX safety margin cannot be negative".to_string(),
            ));
        }

        if self.pricing.default_target_margin_percent < Decimal::ZERO
            || self.pricing.default_target_margin_percent >= Decimal::ONE_HUNDRED
        {
            return Err(AppError::Configuration(
                "Default target margin must be in [0, 100)".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_decimal_env(key: &str, default: &str) -> Result<Decimal> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(&raw)
        .map_err(|_| AppError::Configuration(format!("Invalid {}: {}", key, raw)))
}
