use serde::{Deserialize, Serialize};

use crate::evaluate;

fn default_target_probability() -> f64 {
    0.90
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_max_iterations() -> usize {
    50
}

fn default_search_iterations() -> usize {
    1_000
}

fn default_confirm_iterations() -> usize {
    5_000
}

/// Assumed monthly contribution when the goal has none, used to size the
/// contribution search range.
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 500.0;

/// Shared knobs for the goal solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Success probability the plan should reach
    #[serde(default = "default_target_probability")]
    pub target_probability: f64,
    /// Requested probability tolerance; floored at
    /// [`evaluate::MIN_EFFECTIVE_TOLERANCE`] to stay above sampling noise
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Cap on search steps
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Monte Carlo paths per probe during the search
    #[serde(default = "default_search_iterations")]
    pub search_iterations: usize,
    /// Monte Carlo paths for the final confirmation run
    #[serde(default = "default_confirm_iterations")]
    pub confirm_iterations: usize,
    /// Fixed engine seed for reproducible solves
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            target_probability: default_target_probability(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            search_iterations: default_search_iterations(),
            confirm_iterations: default_confirm_iterations(),
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn effective_tolerance(&self) -> f64 {
        evaluate::effective_tolerance(self.tolerance)
    }
}
