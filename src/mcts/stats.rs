//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Why the iteration loop ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The search has not been stopped yet.
    #[default]
    Running,
    /// The iteration cap was reached.
    IterationLimit,
    /// The time budget ran out.
    TimeLimit,
}

/// Statistics collected during a search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed iterations.
    pub iterations: u64,

    /// Nodes added to the tree, root excluded.
    pub nodes_expanded: u64,

    /// Random playouts run.
    pub simulations: u64,

    /// Iterations whose frontier was already terminal.
    pub terminal_hits: u64,

    /// Deepest node created.
    pub max_depth: u32,

    /// Wall-clock time spent searching (microseconds).
    pub time_us: u64,

    /// Why the search stopped.
    pub stop_reason: StopReason,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
