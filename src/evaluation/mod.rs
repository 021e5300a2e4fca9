//! Independent verification of produced solutions.

mod evaluator;

pub use evaluator::{RouteEvaluator, Violation, ViolationType};
