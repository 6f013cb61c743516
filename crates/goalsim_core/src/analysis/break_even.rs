use tracing::info;

use crate::analysis::config::{BreakEvenConfig, sample_range};
use crate::analysis::progress::SweepProgress;
use crate::analysis::report::{BreakEvenAssessment, BreakEvenCurve, BreakEvenPoint};
use crate::analysis::threshold::{BisectSearch, bisect_for_target, default_bounds};
use crate::error::AnalysisError;
use crate::evaluate::{TrialEvaluator, effective_tolerance};
use crate::model::{GoalSnapshot, PlanVariable};

/// Trace the iso-probability curve over two plan variables.
///
/// `variable_swept` walks its variation band; at each sample a nested
/// bisection solves `variable_solved` for the target probability. Swept
/// values where the target is out of reach simply contribute no point.
/// The caller's current pair is then classified against the curve point
/// whose swept value is nearest the baseline.
pub fn break_even_analysis(
    goal: &GoalSnapshot,
    variable_swept: PlanVariable,
    variable_solved: PlanVariable,
    config: &BreakEvenConfig,
    progress: Option<&SweepProgress>,
) -> Result<BreakEvenCurve, AnalysisError> {
    if variable_swept == variable_solved {
        return Err(AnalysisError::Config(format!(
            "break-even needs two distinct variables, got {variable_swept} twice"
        )));
    }
    if config.grid_size == 0 {
        return Err(AnalysisError::Config("grid size must be at least 1".into()));
    }

    let swept_baseline = goal.value_of(variable_swept);
    let solved_baseline = goal.value_of(variable_solved);
    let (solve_lo, solve_hi) = default_bounds(solved_baseline);
    let tolerance = effective_tolerance(config.tolerance);
    let swept_values = sample_range(swept_baseline, config.variation, config.grid_size);
    if let Some(p) = progress {
        p.start(swept_values.len());
    }

    let mut points = Vec::with_capacity(swept_values.len());
    let mut increasing_in_solved = None;
    for &swept in &swept_values {
        if progress.is_some_and(SweepProgress::is_cancelled) {
            return Err(AnalysisError::Cancelled);
        }
        let trial_goal = goal.with_value(variable_swept, swept);
        let mut eval = TrialEvaluator::with_seed(&trial_goal, config.seed);
        let search = bisect_for_target(
            &mut eval,
            variable_solved,
            solve_lo,
            solve_hi,
            config.target_probability,
            tolerance,
            config.iterations_per_point,
            config.max_bisection_steps,
            None,
        )?;
        if let BisectSearch::Converged {
            value,
            probability,
            increasing,
        } = search
            && (probability - config.target_probability).abs() <= tolerance
        {
            points.push(BreakEvenPoint {
                swept_value: swept,
                solved_value: value,
                probability,
            });
            increasing_in_solved = Some(increasing);
        }
        if let Some(p) = progress {
            p.increment();
        }
    }

    let assessment = assess(&points, increasing_in_solved, swept_baseline, solved_baseline);
    info!(
        %variable_swept,
        %variable_solved,
        points = points.len(),
        ?assessment,
        "break-even analysis finished"
    );
    Ok(BreakEvenCurve {
        variable_swept,
        variable_solved,
        target_probability: config.target_probability,
        points,
        assessment,
    })
}

/// Compare the caller's current solved-variable value against the curve
/// point nearest the swept baseline.
fn assess(
    points: &[BreakEvenPoint],
    increasing_in_solved: Option<bool>,
    swept_baseline: f64,
    solved_baseline: f64,
) -> BreakEvenAssessment {
    let Some(nearest) = points.iter().min_by(|a, b| {
        let da = (a.swept_value - swept_baseline).abs();
        let db = (b.swept_value - swept_baseline).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return BreakEvenAssessment::OffCurve;
    };
    // With probability increasing in the solved variable, sitting above
    // the curve value clears the target; decreasing flips the comparison.
    let clears = match increasing_in_solved {
        Some(true) | None => solved_baseline >= nearest.solved_value,
        Some(false) => solved_baseline <= nearest.solved_value,
    };
    if clears {
        BreakEvenAssessment::Above
    } else {
        BreakEvenAssessment::AtRisk
    }
}
