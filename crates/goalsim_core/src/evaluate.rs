//! Shared trial evaluation for solvers and sensitivity sweeps.
//!
//! Every solver probe and sweep point follows the same shape: clone the
//! goal baseline, substitute one value, simulate, read off the success
//! probability. [`TrialEvaluator`] centralizes that loop and keeps count
//! of how much work a search performed.

use tracing::debug;

use crate::error::ValidationError;
use crate::model::{GoalSnapshot, PlanVariable};
use crate::simulation;

/// Floor on the tolerance used when comparing noisy probability estimates.
///
/// Monte Carlo estimates at search iteration counts carry sampling noise
/// on the order of a few percentage points; tolerances tighter than this
/// would chase that noise rather than the objective.
pub const MIN_EFFECTIVE_TOLERANCE: f64 = 0.05;

/// Tolerance actually applied to probability comparisons.
pub fn effective_tolerance(user_tolerance: f64) -> f64 {
    user_tolerance.max(MIN_EFFECTIVE_TOLERANCE)
}

/// Evaluates goal trials against a fixed baseline.
pub struct TrialEvaluator<'a> {
    goal: &'a GoalSnapshot,
    seed: Option<u64>,
    evaluations: usize,
    simulations: usize,
}

impl<'a> TrialEvaluator<'a> {
    /// Evaluator over a fixed baseline. A pinned seed makes repeated
    /// probes of the same value agree; `None` draws fresh entropy per
    /// trial.
    pub fn with_seed(goal: &'a GoalSnapshot, seed: Option<u64>) -> Self {
        TrialEvaluator {
            goal,
            seed,
            evaluations: 0,
            simulations: 0,
        }
    }

    /// Success probability with one variable substituted.
    pub fn probability(
        &mut self,
        variable: PlanVariable,
        value: f64,
        iterations: usize,
    ) -> Result<f64, ValidationError> {
        let trial = self.goal.with_value(variable, value);
        self.probability_of(&trial, iterations)
    }

    /// Success probability of an arbitrary trial snapshot.
    pub fn probability_of(
        &mut self,
        trial: &GoalSnapshot,
        iterations: usize,
    ) -> Result<f64, ValidationError> {
        self.evaluations += 1;
        // A horizon that has already elapsed leaves nothing to simulate;
        // the outcome is decided by the current balance.
        if trial.years_to_goal <= 0.0 {
            let p = if trial.current_amount >= trial.target_amount {
                1.0
            } else {
                0.0
            };
            return Ok(p);
        }
        let params = trial.to_parameters(iterations, self.seed);
        let result = simulation::run(&params)?;
        self.simulations += result.iterations_run;
        debug!(
            iterations,
            probability = result.success_probability,
            "trial evaluated"
        );
        Ok(result.success_probability)
    }

    /// Number of probability evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Total Monte Carlo paths simulated so far.
    pub fn simulations(&self) -> usize {
        self.simulations
    }
}
