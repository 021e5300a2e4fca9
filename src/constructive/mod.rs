//! Rating-driven greedy construction for team orienteering.
//!
//! - [`is_reachable`] / [`nearest_car`]: feasibility filter and car choice
//! - [`rate`] / [`top_rated`]: point ratings and the tie set of best points
//! - [`greedy_pass`]: one greedy assignment pass with speculative branches

mod feasibility;
mod greedy;
mod rating;

pub use feasibility::{is_reachable, nearest_car};
pub use greedy::{greedy_pass, PassSummary};
pub use rating::{rate, top_rated, Bound, Rating, Term};
