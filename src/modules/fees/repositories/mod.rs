mod fee_schedule_repository;

pub use fee_schedule_repository::{FeeScheduleProvider, InMemoryFeeScheduleRepository};
