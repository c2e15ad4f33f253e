mod record_repository;

pub use record_repository::{
    InMemoryRecordStore, MySqlRecordRepository, Page, RecordFilter, RecordStore,
};
