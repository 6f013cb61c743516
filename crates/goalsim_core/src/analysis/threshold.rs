use tracing::{debug, info};

use crate::analysis::config::ThresholdConfig;
use crate::analysis::progress::SweepProgress;
use crate::analysis::report::ThresholdResult;
use crate::error::{AnalysisError, ValidationError};
use crate::evaluate::{TrialEvaluator, effective_tolerance};
use crate::model::{GoalSnapshot, PlanVariable};

/// Outcome of bisecting one variable toward the target probability.
pub(crate) enum BisectSearch {
    Converged {
        value: f64,
        probability: f64,
        /// Whether probability increases with the variable over the bounds
        increasing: bool,
    },
    /// Both endpoints sit on the same side of the target
    Unbracketed {
        lo_probability: f64,
        hi_probability: f64,
    },
}

/// Bisect `variable` over `[lo, hi]` until the cheap probability estimate
/// lands within the effective tolerance of `target` or the bracket is
/// exhausted. Orientation is inferred from the endpoint probabilities.
pub(crate) fn bisect_for_target(
    eval: &mut TrialEvaluator<'_>,
    variable: PlanVariable,
    lo: f64,
    hi: f64,
    target: f64,
    tolerance: f64,
    iterations: usize,
    max_steps: usize,
    progress: Option<&SweepProgress>,
) -> Result<BisectSearch, AnalysisError> {
    let p_lo = eval.probability(variable, lo, iterations)?;
    let p_hi = eval.probability(variable, hi, iterations)?;
    let increasing = p_hi >= p_lo;

    let (below, above) = if increasing { (p_lo, p_hi) } else { (p_hi, p_lo) };
    if above < target - tolerance || below > target + tolerance {
        return Ok(BisectSearch::Unbracketed {
            lo_probability: p_lo,
            hi_probability: p_hi,
        });
    }

    if progress.is_some_and(SweepProgress::is_cancelled) {
        return Err(AnalysisError::Cancelled);
    }
    let mut a = lo;
    let mut b = hi;
    let mut mid = f64::midpoint(a, b);
    let mut p_mid = eval.probability(variable, mid, iterations)?;
    if let Some(p) = progress {
        p.increment();
    }
    for step in 1..max_steps {
        if (p_mid - target).abs() <= tolerance {
            break;
        }
        if progress.is_some_and(SweepProgress::is_cancelled) {
            return Err(AnalysisError::Cancelled);
        }
        let mid_below_target = if increasing {
            p_mid < target
        } else {
            p_mid > target
        };
        if mid_below_target {
            a = mid;
        } else {
            b = mid;
        }
        mid = f64::midpoint(a, b);
        p_mid = eval.probability(variable, mid, iterations)?;
        debug!(%variable, step, value = mid, probability = p_mid, "bisection step");
        if let Some(p) = progress {
            p.increment();
        }
    }

    Ok(BisectSearch::Converged {
        value: mid,
        probability: p_mid,
        increasing,
    })
}

/// Locate the single value of one variable that reaches the target
/// probability, then confirm it at high iteration count.
///
/// Bounds default to `[0, 4x baseline]` ([0, 1] when the baseline is
/// zero). An unbracketed target or a failed confirmation comes back as a
/// non-converged result carrying the best candidate, not an error.
pub fn threshold_analysis(
    goal: &GoalSnapshot,
    variable: PlanVariable,
    config: &ThresholdConfig,
    progress: Option<&SweepProgress>,
) -> Result<ThresholdResult, AnalysisError> {
    let baseline = goal.value_of(variable);
    let (lo, hi) = config
        .bounds
        .unwrap_or_else(|| default_bounds(baseline));
    if lo >= hi {
        return Err(ValidationError::InvalidBounds {
            field: variable.name(),
            min: lo,
            max: hi,
        }
        .into());
    }
    // The midpoint is always probed once, even with a zero step budget.
    if let Some(p) = progress {
        p.start(config.max_bisection_steps.max(1));
    }

    let target = config.target_probability;
    let tolerance = effective_tolerance(config.tolerance);
    let mut eval = TrialEvaluator::with_seed(goal, config.seed);
    let search = bisect_for_target(
        &mut eval,
        variable,
        lo,
        hi,
        target,
        tolerance,
        config.iterations_per_point,
        config.max_bisection_steps,
        progress,
    )?;

    let result = match search {
        BisectSearch::Unbracketed {
            lo_probability,
            hi_probability,
        } => {
            // Report the endpoint that comes closest to the target.
            let (value, raw) = if (lo_probability - target).abs() <= (hi_probability - target).abs()
            {
                (lo, lo_probability)
            } else {
                (hi, hi_probability)
            };
            ThresholdResult {
                variable,
                converged: false,
                threshold: value,
                baseline,
                delta: value - baseline,
                percent_delta: percent_delta(value, baseline),
                achieved_probability: raw,
                raw_probability: raw,
                evaluations: eval.evaluations(),
                message: Some(format!(
                    "target {:.0}% is not bracketed by [{lo}, {hi}] \
                     (endpoints {:.1}% and {:.1}%)",
                    target * 100.0,
                    lo_probability * 100.0,
                    hi_probability * 100.0
                )),
            }
        }
        BisectSearch::Converged { value, .. } => {
            let raw = eval.probability(variable, value, config.confirm_iterations)?;
            let converged = (raw - target).abs() <= tolerance;
            ThresholdResult {
                variable,
                converged,
                threshold: value,
                baseline,
                delta: value - baseline,
                percent_delta: percent_delta(value, baseline),
                achieved_probability: if converged { target } else { raw },
                raw_probability: raw,
                evaluations: eval.evaluations(),
                message: (!converged).then(|| {
                    format!(
                        "candidate {value:.4} confirmed at {:.1}%, outside tolerance of \
                         the {:.0}% target",
                        raw * 100.0,
                        target * 100.0
                    )
                }),
            }
        }
    };

    info!(
        %variable,
        converged = result.converged,
        threshold = result.threshold,
        "threshold analysis finished"
    );
    Ok(result)
}

pub(crate) fn default_bounds(baseline: f64) -> (f64, f64) {
    if baseline > 0.0 {
        (0.0, 4.0 * baseline)
    } else {
        (0.0, 1.0)
    }
}

fn percent_delta(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        (value - baseline) / baseline * 100.0
    }
}
