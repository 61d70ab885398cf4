//! Solver traits and configuration.

use crate::result::SolveResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common configuration for solvers.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum computation time in milliseconds (0 = unlimited).
    ///
    /// Checked between items; a run that hits the limit returns what it has
    /// packed so far, flagged as truncated.
    pub time_limit_ms: u64,

    /// Evaluate already-opened containers in parallel when searching for a
    /// home for an item. The packing produced is the same either way.
    pub parallel: bool,

    /// Number of threads to use when `parallel` is set (0 = auto).
    pub threads: usize,
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Enables or disables parallel evaluation of opened containers.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the number of worker threads for parallel evaluation.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Checks the configuration for contradictory settings.
    pub fn validate(&self) -> Result<()> {
        if self.threads > 0 && !self.parallel {
            return Err(Error::ConfigError(format!(
                "threads = {} has no effect unless parallel evaluation is enabled",
                self.threads
            )));
        }
        Ok(())
    }

    /// Returns true if a time limit is configured.
    pub fn has_time_limit(&self) -> bool {
        self.time_limit_ms > 0
    }
}

/// Progress callback for long-running operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during solving.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Items processed so far (placed or not).
    pub items_processed: usize,
    /// Total number of items in the run.
    pub total_items: usize,
    /// Containers opened so far.
    pub containers_opened: usize,
    /// Current aggregate utilization.
    pub utilization: f64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the solver is still running.
    pub running: bool,
}

/// Trait for packing solvers.
pub trait Solver {
    /// The item type this solver handles.
    type Item;
    /// The container description this solver packs into: a single container
    /// or a catalog of sizes.
    type Boundary;

    /// Solves the packing problem.
    fn solve(&self, items: &[Self::Item], boundary: &Self::Boundary) -> Result<SolveResult>;

    /// Solves with a progress callback, invoked after every item.
    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<SolveResult>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}
