//! Integration tests for the goal projection engine
//!
//! Tests are organized by topic:
//! - `simulation` - Monte Carlo engine mechanics and edge cases
//! - `solver` - Goal solvers (contribution, timeline, target, withdrawal)
//! - `analysis` - Sensitivity sweeps and break-even curves

mod simulation;
mod solver;

use crate::model::GoalSnapshot;

/// Baseline goal used across the test modules: a moderately funded plan
/// twenty years from its target.
pub(crate) fn baseline_goal() -> GoalSnapshot {
    GoalSnapshot {
        current_amount: 100_000.0,
        monthly_contribution: 500.0,
        target_amount: 300_000.0,
        retirement_age: 65.0,
        life_expectancy: 90.0,
        years_to_goal: 20.0,
        inflation_rate: 0.02,
        expected_return: 0.07,
        volatility: 0.12,
    }
}
