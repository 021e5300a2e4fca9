//! Bounded exploration of speculative branches.
//!
//! [`explore`] works a LIFO pool of partial solutions, completing each with
//! one greedy pass and keeping the most profitable result. [`solve`] runs it
//! from an empty solution and verifies the outcome.

mod explorer;

pub use explorer::{explore, solve, Exploration};
