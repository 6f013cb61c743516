use serde::{Deserialize, Serialize};

use crate::stats;

/// Cross-section of the path distribution at one year boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// 1-based year index into the horizon
    pub year: usize,
    pub median: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Summary statistics of the terminal-value distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub best_case: f64,
    pub worst_case: f64,
    /// Fraction of paths that ended below the starting value
    pub probability_of_loss: f64,
}

impl DistributionSummary {
    pub fn from_samples(samples: &[f64], initial_value: f64) -> Self {
        if samples.is_empty() {
            return DistributionSummary::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let losses = sorted.iter().take_while(|v| **v < initial_value).count();
        DistributionSummary {
            mean: stats::mean(&sorted),
            median: stats::percentile(&sorted, 50.0),
            p10: stats::percentile(&sorted, 10.0),
            p25: stats::percentile(&sorted, 25.0),
            p75: stats::percentile(&sorted, 75.0),
            p90: stats::percentile(&sorted, 90.0),
            best_case: sorted[sorted.len() - 1],
            worst_case: sorted[0],
            probability_of_loss: losses as f64 / sorted.len() as f64,
        }
    }
}

/// Output of one Monte Carlo projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Fraction of paths whose terminal value reached the goal amount
    pub success_probability: f64,
    /// Terminal value of every path, in path order
    pub terminal_values: Vec<f64>,
    /// Percentile cross-sections at each year boundary
    pub yearly_projection: Vec<YearlyProjection>,
    pub summary: DistributionSummary,
    /// Paths actually simulated; 0 when the run short-circuited
    pub iterations_run: usize,
}

impl SimulationResult {
    /// Result for a goal that is satisfied without simulating.
    pub fn trivial_success() -> Self {
        SimulationResult {
            success_probability: 1.0,
            terminal_values: Vec::new(),
            yearly_projection: Vec::new(),
            summary: DistributionSummary::default(),
            iterations_run: 0,
        }
    }
}
