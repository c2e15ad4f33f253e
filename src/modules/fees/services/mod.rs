mod fee_evaluator;

pub use fee_evaluator::FeeEvaluator;
