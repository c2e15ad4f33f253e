mod price_solver;
mod regime_comparator;

pub use price_solver::PriceSolver;
pub use regime_comparator::{RegimeComparator, StrategyThresholds};
