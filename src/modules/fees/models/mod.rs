mod fee_schedule;

pub use fee_schedule::{CommissionTier, MarketplaceFeeSchedule, PaymentProcessorFee};
