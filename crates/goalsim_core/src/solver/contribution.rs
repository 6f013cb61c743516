use tracing::info;

use crate::error::ValidationError;
use crate::evaluate::TrialEvaluator;
use crate::model::{GoalSnapshot, PlanVariable};
use crate::solver::config::{DEFAULT_MONTHLY_CONTRIBUTION, SolverConfig};
use crate::solver::result::{ContributionSolution, SolverOutcome};
use crate::solver::{confirm, minimize_distance};

/// Find the monthly contribution that reaches the target probability.
///
/// The current contribution is probed first; when it already lands within
/// the effective tolerance the solve returns without searching. Otherwise
/// the search covers `[0, 10x]` of the current contribution (or of a
/// default when the plan contributes nothing yet).
pub fn solve_contribution(
    goal: &GoalSnapshot,
    config: &SolverConfig,
) -> Result<ContributionSolution, ValidationError> {
    let variable = PlanVariable::MonthlyContribution;
    let current = goal.monthly_contribution;
    let mut eval = TrialEvaluator::with_seed(goal, config.seed);

    let probe = eval.probability(variable, current, config.search_iterations)?;
    if probe >= config.target_probability - config.effective_tolerance() {
        let raw = eval.probability(variable, current, config.confirm_iterations)?;
        let outcome = SolverOutcome::success(
            current,
            raw,
            config.target_probability,
            eval.evaluations(),
            eval.simulations(),
        );
        info!(contribution = current, "current contribution already adequate");
        return Ok(ContributionSolution {
            outcome,
            required_contribution: current,
            monthly_delta: 0.0,
        });
    }

    let reference = if current > 0.0 {
        current
    } else {
        DEFAULT_MONTHLY_CONTRIBUTION
    };
    let candidate = minimize_distance(
        &mut eval,
        variable,
        0.0,
        10.0 * reference,
        config.target_probability,
        config,
    )?;
    let outcome = confirm(&mut eval, variable, candidate, config)?;
    info!(
        required = outcome.value,
        probability = outcome.raw_probability,
        success = outcome.is_success(),
        "contribution solve finished"
    );

    Ok(ContributionSolution {
        required_contribution: outcome.value,
        monthly_delta: outcome.value - current,
        outcome,
    })
}
