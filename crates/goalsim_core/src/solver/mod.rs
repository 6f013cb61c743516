//! Goal solvers.
//!
//! Each solver turns a plan question ("how much do I need to save?",
//! "when can I retire?") into a scalar search: one goal field becomes the
//! unknown, the simulated success probability becomes the objective, and
//! the search looks for the value whose probability lands on the target.
//!
//! Because the objective is a sampled estimate rather than an exact
//! function, the searches run on a cheap iteration count, re-confirm the
//! converged candidate with a high-iteration run, and judge convergence
//! against the effective tolerance so sampling noise does not turn a
//! workable plan into a spurious failure. Exhausting the bounds without
//! reaching tolerance is reported as a structured no-solution outcome,
//! not an error.

mod config;
mod contribution;
mod result;
mod target;
mod timeline;
mod withdrawal;

pub use config::{DEFAULT_MONTHLY_CONTRIBUTION, SolverConfig};
pub use contribution::solve_contribution;
pub use result::{
    ContributionSolution, SolverOutcome, SolverStatus, TargetAmountSolution, TimelineSolution,
    WithdrawalSolution,
};
pub use target::solve_target_amount;
pub use timeline::{TimelineOptions, solve_timeline};
pub use withdrawal::{DEFAULT_RATE_BOUNDS, RetirementMarket, solve_withdrawal_rate};

use tracing::debug;

use crate::error::ValidationError;
use crate::evaluate::TrialEvaluator;
use crate::model::PlanVariable;

const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Golden-section minimization of `|f(x) - target|` over `[lo, hi]`.
///
/// Runs on the cheap search iteration count; callers confirm the returned
/// candidate separately. The bracket shrinks by a constant factor per
/// step, so `max_iterations` doubles as a hard cost cap.
pub(crate) fn minimize_distance(
    eval: &mut TrialEvaluator<'_>,
    variable: PlanVariable,
    lo: f64,
    hi: f64,
    target: f64,
    config: &SolverConfig,
) -> Result<f64, ValidationError> {
    let width_tolerance = 1e-3 * (hi - lo).abs();
    let mut a = lo;
    let mut b = hi;
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = (eval.probability(variable, c, config.search_iterations)? - target).abs();
    let mut fd = (eval.probability(variable, d, config.search_iterations)? - target).abs();

    for step in 0..config.max_iterations {
        if (b - a).abs() <= width_tolerance {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = eval
                .probability(variable, c, config.search_iterations)
                .map(|p| (p - target).abs())?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = eval
                .probability(variable, d, config.search_iterations)
                .map(|p| (p - target).abs())?;
        }
        debug!(%variable, step, lo = a, hi = b, "search step");
    }

    Ok(f64::midpoint(a, b))
}

/// Confirm a converged candidate with a high-iteration run.
pub(crate) fn confirm(
    eval: &mut TrialEvaluator<'_>,
    variable: PlanVariable,
    candidate: f64,
    config: &SolverConfig,
) -> Result<SolverOutcome, ValidationError> {
    let target = config.target_probability;
    let raw = eval.probability(variable, candidate, config.confirm_iterations)?;
    let outcome = if raw >= target - config.effective_tolerance() {
        SolverOutcome::success(candidate, raw, target, eval.evaluations(), eval.simulations())
    } else {
        SolverOutcome::no_solution(
            candidate,
            raw,
            eval.evaluations(),
            eval.simulations(),
            format!(
                "no value of {variable} within bounds reaches {:.0}% success \
                 (best candidate {candidate:.2} confirmed at {:.1}%)",
                target * 100.0,
                raw * 100.0
            ),
        )
    };
    Ok(outcome)
}
