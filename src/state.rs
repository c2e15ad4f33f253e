use std::sync::Arc;

use crate::config::PricingConfig;
use crate::modules::fees::FeeScheduleProvider;
use crate::modules::records::RecordStore;
use crate::modules::tariffs::TariffRuleProvider;

/// Read-only collaborators shared by the HTTP controllers.
///
/// The providers are injected here once at startup; the calculation
/// services never reach into a live store themselves.
pub struct AppState {
    pub fee_schedules: Arc<dyn FeeScheduleProvider>,
    pub tariff_rules: Arc<dyn TariffRuleProvider>,
    pub records: Arc<dyn RecordStore>,
    pub pricing: PricingConfig,
}
