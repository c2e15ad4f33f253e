mod calculation_record;

pub use calculation_record::{CalculationKind, CalculationRecord};
