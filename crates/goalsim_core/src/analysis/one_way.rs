use tracing::info;

use crate::analysis::config::{OneWayConfig, sample_range};
use crate::analysis::progress::SweepProgress;
use crate::analysis::report::{SensitivityPoint, TornadoEntry};
use crate::error::AnalysisError;
use crate::evaluate::TrialEvaluator;
use crate::model::{GoalSnapshot, PlanVariable};

/// One-variable-at-a-time sensitivity sweep.
///
/// Each variable is sampled over its variation band while everything else
/// stays at baseline. Entries come back in tornado order: largest
/// probability swing first, ties keeping caller order.
pub fn one_way_sensitivity(
    goal: &GoalSnapshot,
    variables: &[PlanVariable],
    config: &OneWayConfig,
    progress: Option<&SweepProgress>,
) -> Result<Vec<TornadoEntry>, AnalysisError> {
    if variables.is_empty() {
        return Err(AnalysisError::Config(
            "at least one variable is required".into(),
        ));
    }
    if let Some(p) = progress {
        p.start(variables.len() * config.num_points);
    }

    let mut entries = Vec::with_capacity(variables.len());
    for &variable in variables {
        let baseline = goal.value_of(variable);
        let mut eval = TrialEvaluator::with_seed(goal, config.seed);
        let mut points = Vec::with_capacity(config.num_points);
        for value in sample_range(baseline, config.variation, config.num_points) {
            if progress.is_some_and(SweepProgress::is_cancelled) {
                return Err(AnalysisError::Cancelled);
            }
            let probability = eval.probability(variable, value, config.iterations_per_point)?;
            points.push(SensitivityPoint { value, probability });
            if let Some(p) = progress {
                p.increment();
            }
        }

        let min = points
            .iter()
            .map(|p| p.probability)
            .fold(f64::INFINITY, f64::min);
        let max = points
            .iter()
            .map(|p| p.probability)
            .fold(f64::NEG_INFINITY, f64::max);
        let impact_range = if max > min { max - min } else { 0.0 };
        entries.push(TornadoEntry {
            variable,
            baseline,
            points,
            impact_range,
        });
    }

    // Stable sort keeps caller order among equal impacts.
    entries.sort_by(|a, b| {
        b.impact_range
            .partial_cmp(&a.impact_range)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    info!(
        variables = variables.len(),
        top_impact = entries.first().map(|e| e.impact_range).unwrap_or(0.0),
        "tornado sweep finished"
    );
    Ok(entries)
}
