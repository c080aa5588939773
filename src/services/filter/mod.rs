mod builder;
mod controller;
mod evaluator;

pub use builder::FilterCriteriaBuilder;
pub use controller::FilterController;
pub use evaluator::{is_visible, summarize, FilterEvaluator, FilterOutcome};
