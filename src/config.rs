//! Heuristic parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default cap on branch-pool pops per exploration.
///
/// Every pop is completed, so at most this many greedy passes run.
pub const DEFAULT_MAX_POPS: usize = 512;

/// Parameters of the rating-driven greedy construction.
///
/// The three weights scale the profit, travel-time and non-choice terms of a
/// point's rating. `max_deviation` bounds the extra distance a detour may add
/// when splicing points into a freshly driven leg, and `max_pops` caps how
/// many partial solutions the branch explorer pops.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Examples
///
/// ```
/// use u_orienteering::config::GreedyConfig;
///
/// let config = GreedyConfig::default()
///     .with_weights(1.0, 0.5, 2.0)
///     .with_max_deviation(3.0);
/// assert_eq!(config.time_weight(), 0.5);
/// assert_eq!(config.max_pops(), 512);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    profit_weight: f64,
    time_weight: f64,
    non_choice_weight: f64,
    max_deviation: f64,
    max_pops: usize,
}

impl GreedyConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the profit, time and non-choice weights.
    pub fn with_weights(mut self, profit: f64, time: f64, non_choice: f64) -> Self {
        self.profit_weight = profit;
        self.time_weight = time;
        self.non_choice_weight = non_choice;
        self
    }

    /// Sets the maximum admissible detour deviation.
    pub fn with_max_deviation(mut self, max_deviation: f64) -> Self {
        self.max_deviation = max_deviation;
        self
    }

    /// Sets the cap on branch-pool pops.
    pub fn with_max_pops(mut self, max_pops: usize) -> Self {
        self.max_pops = max_pops;
        self
    }

    /// Weight of the profit term.
    pub fn profit_weight(&self) -> f64 {
        self.profit_weight
    }

    /// Weight of the travel-time term.
    pub fn time_weight(&self) -> f64 {
        self.time_weight
    }

    /// Weight of the non-choice (opportunity cost) term.
    pub fn non_choice_weight(&self) -> f64 {
        self.non_choice_weight
    }

    /// Maximum extra distance a spliced detour may add.
    pub fn max_deviation(&self) -> f64 {
        self.max_deviation
    }

    /// Cap on branch-pool pops.
    pub fn max_pops(&self) -> usize {
        self.max_pops
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("profit_weight", self.profit_weight),
            ("time_weight", self.time_weight),
            ("non_choice_weight", self.non_choice_weight),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { name, value });
            }
        }
        if !self.max_deviation.is_finite() || self.max_deviation < 0.0 {
            return Err(ConfigError::InvalidDeviation(self.max_deviation));
        }
        if self.max_pops == 0 {
            return Err(ConfigError::ZeroPops);
        }
        Ok(())
    }
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            profit_weight: 1.0,
            time_weight: 1.0,
            non_choice_weight: 1.0,
            max_deviation: 1.0,
            max_pops: DEFAULT_MAX_POPS,
        }
    }
}
