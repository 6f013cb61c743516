use tracing::info;

use crate::analysis::config::{TwoWayConfig, sample_range};
use crate::analysis::progress::SweepProgress;
use crate::analysis::report::HeatmapGrid;
use crate::error::AnalysisError;
use crate::evaluate::TrialEvaluator;
use crate::model::{GoalSnapshot, PlanVariable};

const CONTOUR_CANDIDATES: [f64; 3] = [0.5, 0.75, 0.9];

/// Probability surface over the cross product of two variable ranges.
///
/// This is the most expensive sweep: `grid_size^2` simulations. Results
/// land in the grid by index, row `i` for `x_values[i]` and column `j`
/// for `y_values[j]`, so the layout is deterministic.
pub fn two_way_sensitivity(
    goal: &GoalSnapshot,
    variable_x: PlanVariable,
    variable_y: PlanVariable,
    config: &TwoWayConfig,
    progress: Option<&SweepProgress>,
) -> Result<HeatmapGrid, AnalysisError> {
    if variable_x == variable_y {
        return Err(AnalysisError::Config(format!(
            "two-way sweep needs two distinct variables, got {variable_x} twice"
        )));
    }
    if config.grid_size == 0 {
        return Err(AnalysisError::Config("grid size must be at least 1".into()));
    }

    let x_values = sample_range(goal.value_of(variable_x), config.variation, config.grid_size);
    let y_values = sample_range(goal.value_of(variable_y), config.variation, config.grid_size);
    if let Some(p) = progress {
        p.start(config.grid_size * config.grid_size);
    }

    let mut probabilities = vec![vec![0.0; config.grid_size]; config.grid_size];
    for (i, &x) in x_values.iter().enumerate() {
        let row_goal = goal.with_value(variable_x, x);
        let mut eval = TrialEvaluator::with_seed(&row_goal, config.seed);
        for (j, &y) in y_values.iter().enumerate() {
            if progress.is_some_and(SweepProgress::is_cancelled) {
                return Err(AnalysisError::Cancelled);
            }
            probabilities[i][j] =
                eval.probability(variable_y, y, config.iterations_per_point)?;
            if let Some(p) = progress {
                p.increment();
            }
        }
    }

    let min_probability = probabilities
        .iter()
        .flatten()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let max_probability = probabilities
        .iter()
        .flatten()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let mut contour_levels: Vec<f64> = CONTOUR_CANDIDATES
        .into_iter()
        .filter(|l| *l > min_probability && *l < max_probability)
        .collect();
    if contour_levels.is_empty() && max_probability > min_probability {
        contour_levels.push(f64::midpoint(min_probability, max_probability));
    }

    info!(
        %variable_x,
        %variable_y,
        grid = config.grid_size,
        min = min_probability,
        max = max_probability,
        "heat-map sweep finished"
    );
    Ok(HeatmapGrid {
        variable_x,
        variable_y,
        x_values,
        y_values,
        probabilities,
        min_probability,
        max_probability,
        contour_levels,
    })
}
