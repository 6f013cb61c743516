use tracing::info;

use crate::error::ValidationError;
use crate::evaluate::TrialEvaluator;
use crate::model::{GoalSnapshot, PlanVariable};
use crate::solver::config::SolverConfig;
use crate::solver::result::TargetAmountSolution;
use crate::solver::{confirm, minimize_distance};

/// Find the target amount achievable at the required confidence.
///
/// Searches `[0.5x, 2x]` of the plan's stated target. A positive delta
/// means the plan supports a more ambitious goal than stated.
pub fn solve_target_amount(
    goal: &GoalSnapshot,
    config: &SolverConfig,
) -> Result<TargetAmountSolution, ValidationError> {
    if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
        return Err(ValidationError::InvalidParameter {
            field: "target_amount",
            value: goal.target_amount,
            reason: "target amount must be positive to size the search range",
        });
    }

    let variable = PlanVariable::TargetAmount;
    let mut eval = TrialEvaluator::with_seed(goal, config.seed);
    let candidate = minimize_distance(
        &mut eval,
        variable,
        0.5 * goal.target_amount,
        2.0 * goal.target_amount,
        config.target_probability,
        config,
    )?;
    let outcome = confirm(&mut eval, variable, candidate, config)?;
    info!(
        achievable = outcome.value,
        probability = outcome.raw_probability,
        success = outcome.is_success(),
        "target amount solve finished"
    );

    Ok(TargetAmountSolution {
        achievable_target: outcome.value,
        delta_from_current: outcome.value - goal.target_amount,
        outcome,
    })
}
