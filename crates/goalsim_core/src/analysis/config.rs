use serde::{Deserialize, Serialize};

fn default_variation() -> f64 {
    0.20
}

fn default_num_points() -> usize {
    5
}

fn default_one_way_iterations() -> usize {
    1_000
}

fn default_grid_size() -> usize {
    10
}

fn default_grid_iterations() -> usize {
    500
}

fn default_target_probability() -> f64 {
    0.90
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_threshold_iterations() -> usize {
    1_000
}

fn default_confirm_iterations() -> usize {
    5_000
}

fn default_max_bisection_steps() -> usize {
    50
}

fn default_break_even_variation() -> f64 {
    0.30
}

fn default_break_even_grid() -> usize {
    20
}

/// Settings for a tornado (one-variable-at-a-time) sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWayConfig {
    /// Fractional variation around the baseline, 0.20 for +/-20%
    #[serde(default = "default_variation")]
    pub variation: f64,
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    #[serde(default = "default_one_way_iterations")]
    pub iterations_per_point: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for OneWayConfig {
    fn default() -> Self {
        OneWayConfig {
            variation: default_variation(),
            num_points: default_num_points(),
            iterations_per_point: default_one_way_iterations(),
            seed: None,
        }
    }
}

/// Settings for a two-variable heat-map sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWayConfig {
    #[serde(default = "default_variation")]
    pub variation: f64,
    /// Cells per axis; total cost is the square of this
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_grid_iterations")]
    pub iterations_per_point: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TwoWayConfig {
    fn default() -> Self {
        TwoWayConfig {
            variation: default_variation(),
            grid_size: default_grid_size(),
            iterations_per_point: default_grid_iterations(),
            seed: None,
        }
    }
}

/// Settings for locating the value of one variable that hits the target
/// probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_target_probability")]
    pub target_probability: f64,
    /// Floored at the effective tolerance when judging convergence
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Search bounds; derived from the baseline when absent
    #[serde(default)]
    pub bounds: Option<(f64, f64)>,
    #[serde(default = "default_threshold_iterations")]
    pub iterations_per_point: usize,
    #[serde(default = "default_confirm_iterations")]
    pub confirm_iterations: usize,
    #[serde(default = "default_max_bisection_steps")]
    pub max_bisection_steps: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig {
            target_probability: default_target_probability(),
            tolerance: default_tolerance(),
            bounds: None,
            iterations_per_point: default_threshold_iterations(),
            confirm_iterations: default_confirm_iterations(),
            max_bisection_steps: default_max_bisection_steps(),
            seed: None,
        }
    }
}

/// Settings for tracing an iso-probability curve over two variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenConfig {
    #[serde(default = "default_target_probability")]
    pub target_probability: f64,
    #[serde(default = "default_break_even_variation")]
    pub variation: f64,
    #[serde(default = "default_break_even_grid")]
    pub grid_size: usize,
    #[serde(default = "default_grid_iterations")]
    pub iterations_per_point: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_bisection_steps")]
    pub max_bisection_steps: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BreakEvenConfig {
    fn default() -> Self {
        BreakEvenConfig {
            target_probability: default_target_probability(),
            variation: default_break_even_variation(),
            grid_size: default_break_even_grid(),
            iterations_per_point: default_grid_iterations(),
            tolerance: default_tolerance(),
            max_bisection_steps: default_max_bisection_steps(),
            seed: None,
        }
    }
}

/// Equally spaced sample values over `[base*(1-variation), base*(1+variation)]`.
///
/// A zero baseline collapses the range; the sweep still produces `n`
/// points so output arrays keep their expected shape.
pub(crate) fn sample_range(base: f64, variation: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let lo = base * (1.0 - variation);
    let hi = base * (1.0 + variation);
    if n == 1 || lo == hi {
        return vec![f64::midpoint(lo, hi); n];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_range_spans_variation() {
        let values = sample_range(100.0, 0.20, 5);
        assert_eq!(values, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
    }

    #[test]
    fn sample_range_zero_baseline_repeats() {
        let values = sample_range(0.0, 0.20, 4);
        assert_eq!(values, vec![0.0; 4]);
    }
}
