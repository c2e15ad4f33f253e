// Fees module: marketplace commission schedules and fee evaluation

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CommissionTier, MarketplaceFeeSchedule, PaymentProcessorFee};
pub use repositories::{FeeScheduleProvider, InMemoryFeeScheduleRepository};
pub use services::FeeEvaluator;
