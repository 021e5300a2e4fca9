//! Error types.
//!
//! Instance and configuration errors surface invalid input before any solving
//! starts. [`SolveError`] covers contract breaches detected while solving; both
//! of its variants are fatal to the current solve attempt.

use thiserror::Error;

/// Errors returned while building an [`Instance`](crate::models::Instance).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// Fewer than two points (start and end depot) were supplied.
    #[error("instance needs at least a start and an end depot, got {0} point(s)")]
    TooFewPoints(usize),
    /// No vehicles.
    #[error("instance needs at least one car")]
    NoCars,
    /// Time budget was zero, negative or not finite.
    #[error("time budget must be positive and finite, got {0}")]
    InvalidBudget(f64),
    /// Distance matrix does not match the number of points.
    #[error("distance matrix has size {matrix}, expected {points}")]
    MatrixSizeMismatch {
        /// Matrix dimension.
        matrix: usize,
        /// Number of points.
        points: usize,
    },
    /// A distance entry was negative or not finite.
    #[error("distance from {from} to {to} is invalid: {value}")]
    InvalidDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// The distance matrix is not symmetric.
    #[error("distance matrix is not symmetric between {0} and {1}")]
    AsymmetricDistance(usize, usize),
    /// A profit was negative or not finite.
    #[error("profit of point {point} is invalid: {value}")]
    InvalidProfit {
        /// Point index.
        point: usize,
        /// Offending value.
        value: f64,
    },
    /// An unused car could not even drive from start to end depot.
    #[error("depot-to-depot distance {distance} exceeds time budget {max_time}")]
    DepotsTooFar {
        /// Start-to-end distance.
        distance: f64,
        /// Time budget.
        max_time: f64,
    },
    /// Malformed benchmark text.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Errors returned by [`GreedyConfig::validate`](crate::config::GreedyConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A rating weight was NaN or infinite.
    #[error("weight `{name}` must be finite, got {value}")]
    NonFiniteWeight {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The admissible detour deviation was negative or not finite.
    #[error("max deviation must be finite and non-negative, got {0}")]
    InvalidDeviation(f64),
    /// The exploration pop cap was zero.
    #[error("max pops must be at least 1")]
    ZeroPops,
}

/// Errors that abort a solve attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Detour splicing was requested for a car that has not left its start depot.
    #[error("car {car} has not left the start depot")]
    CarAtDepot {
        /// Car index.
        car: usize,
    },
    /// Solution state disagreed with a feasibility check made just before.
    #[error("car {car}: {reason}")]
    InvariantViolated {
        /// Car index.
        car: usize,
        /// Which check failed.
        reason: String,
    },
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SolveError {
    pub(crate) fn invariant(car: usize, reason: impl Into<String>) -> Self {
        Self::InvariantViolated {
            car,
            reason: reason.into(),
        }
    }
}
