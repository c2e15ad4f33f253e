// Records module: append-only store of completed computations

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{CalculationKind, CalculationRecord};
pub use repositories::{InMemoryRecordStore, MySqlRecordRepository, Page, RecordFilter, RecordStore};
