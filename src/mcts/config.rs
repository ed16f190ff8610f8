//! Search budget and tuning parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::SearchError;

/// UCT search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Wall-clock budget in seconds (<= 0 = unlimited).
    /// Checked once at the start of every iteration after the first.
    pub max_seconds: f64,

    /// Iteration cap (<= 0 = unlimited).
    pub max_iterations: i64,

    /// UCB1 exploration constant (default: sqrt(2)).
    /// With sqrt(2) the exploration term is sqrt(2 ln N / n).
    pub exploration_constant: f64,

    /// Seed for the search RNG.
    /// `None` draws a fresh seed from OS entropy on every search.
    pub seed: Option<u64>,

    /// Initial node arena capacity.
    pub node_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_seconds: 1.0,
            max_iterations: 0,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: None,
            node_capacity: 1024,
        }
    }
}

impl SearchConfig {
    /// Config with the given time and iteration limits and default tuning.
    #[must_use]
    pub fn budget(max_seconds: f64, max_iterations: i64) -> Self {
        Self {
            max_seconds,
            max_iterations,
            ..Self::default()
        }
    }

    /// Set the time limit in seconds.
    pub fn with_max_seconds(mut self, seconds: f64) -> Self {
        self.max_seconds = seconds;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, iterations: i64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial node arena capacity.
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Time limit, if any.
    ///
    /// Budgets too large for a `Duration` (including infinity) count as no
    /// time limit.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        if self.max_seconds > 0.0 {
            Duration::try_from_secs_f64(self.max_seconds).ok()
        } else {
            None
        }
    }

    /// Iteration limit, if any.
    #[must_use]
    pub fn iteration_limit(&self) -> Option<u64> {
        if self.max_iterations > 0 {
            Some(self.max_iterations as u64)
        } else {
            None
        }
    }

    /// Neither limit is set; a search with this config never stops.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none() && self.iteration_limit().is_none()
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_seconds.is_nan() {
            return Err(SearchError::InvalidConfig("max_seconds is NaN".into()));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
