//! Domain model types for team orienteering problems.
//!
//! Provides the core abstractions: profit-bearing points, a problem trait
//! with a validated concrete instance, per-car routes, and the mutable
//! solution state that heuristics commit moves to and roll moves back from.

mod instance;
mod point;
mod problem;
mod route;
mod solution;

pub use instance::Instance;
pub use point::Point;
pub use problem::OrienteeringProblem;
pub use route::CarRoute;
pub use solution::{MoveOutcome, RoutePlan, Solution};
