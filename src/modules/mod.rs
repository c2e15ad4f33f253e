pub mod exchange;
pub mod fees;
pub mod pricing;
pub mod records;
pub mod tariffs;
