//! Tests for the goal solvers

use crate::error::ValidationError;
use crate::evaluate::TrialEvaluator;
use crate::model::PlanVariable;
use crate::solver::{
    RetirementMarket, SolverConfig, TimelineOptions, solve_contribution, solve_target_amount,
    solve_timeline, solve_withdrawal_rate,
};
use crate::tests::baseline_goal;

fn config() -> SolverConfig {
    SolverConfig {
        seed: Some(17),
        ..SolverConfig::default()
    }
}

#[test]
fn test_solve_contribution_reaches_target_or_reports_no_solution() {
    let solution = solve_contribution(&baseline_goal(), &config()).unwrap();

    if solution.outcome.is_success() {
        assert!(
            solution.outcome.raw_probability
                >= config().target_probability - config().effective_tolerance()
        );
        assert!(solution.outcome.achieved_probability >= config().target_probability);
        assert!(solution.required_contribution >= 0.0);
        assert!(solution.required_contribution <= 5_000.0);
        assert_eq!(
            solution.monthly_delta,
            solution.required_contribution - 500.0
        );
    } else {
        assert!(solution.outcome.message.is_some());
    }
    assert!(solution.outcome.simulations_run > 0);
}

#[test]
fn test_solve_contribution_short_circuits_when_adequate() {
    // A tiny target is met by the current balance alone.
    let mut goal = baseline_goal();
    goal.target_amount = 50_000.0;

    let solution = solve_contribution(&goal, &config()).unwrap();
    assert!(solution.outcome.is_success());
    assert_eq!(solution.required_contribution, 500.0);
    assert_eq!(solution.monthly_delta, 0.0);
    // Probe plus confirmation, no search.
    assert_eq!(solution.outcome.evaluations, 2);
}

#[test]
fn test_solve_timeline_age_within_bounds() {
    let options = TimelineOptions {
        min_age: 55,
        max_age: 75,
        prefer_stated_age: false,
    };
    let solution = solve_timeline(&baseline_goal(), &config(), &options).unwrap();

    assert!(solution.required_age >= options.min_age);
    assert!(solution.required_age <= options.max_age);
    let expected_years = solution.required_age as f64 - baseline_goal().current_age();
    assert_eq!(solution.required_years, expected_years);
    if solution.outcome.is_success() {
        assert_eq!(
            solution.can_retire_earlier,
            (solution.required_age as f64) < 65.0
        );
    }
}

#[test]
fn test_solve_timeline_rejects_bounds_below_current_age() {
    // Implied current age 70: retiring inside [50, 60] is in the past.
    let mut goal = baseline_goal();
    goal.retirement_age = 75.0;
    goal.years_to_goal = 5.0;

    let options = TimelineOptions {
        min_age: 50,
        max_age: 60,
        prefer_stated_age: false,
    };
    assert!(matches!(
        solve_timeline(&goal, &config(), &options),
        Err(ValidationError::InvalidParameter {
            field: "retirement_age",
            ..
        })
    ));
}

#[test]
fn test_solve_timeline_prefer_stated_age() {
    // An easy target makes the earliest scanned age feasible, so the two
    // flag settings must diverge: earliest age off, stated age on.
    let mut goal = baseline_goal();
    goal.target_amount = 120_000.0;

    let earliest = solve_timeline(
        &goal,
        &config(),
        &TimelineOptions {
            min_age: 55,
            max_age: 75,
            prefer_stated_age: false,
        },
    )
    .unwrap();
    assert!(earliest.outcome.is_success());
    assert_eq!(earliest.required_age, 55);
    assert!(earliest.can_retire_earlier);

    let stated = solve_timeline(
        &goal,
        &config(),
        &TimelineOptions {
            min_age: 55,
            max_age: 75,
            prefer_stated_age: true,
        },
    )
    .unwrap();
    assert!(stated.outcome.is_success());
    assert_eq!(stated.required_age, 65);
    assert!(!stated.can_retire_earlier);
}

#[test]
fn test_solve_timeline_rejects_inverted_bounds() {
    let options = TimelineOptions {
        min_age: 70,
        max_age: 60,
        prefer_stated_age: false,
    };
    assert!(matches!(
        solve_timeline(&baseline_goal(), &config(), &options),
        Err(ValidationError::InvalidBounds {
            field: "retirement_age",
            ..
        })
    ));
}

#[test]
fn test_solve_target_amount_stays_in_range() {
    let solution = solve_target_amount(&baseline_goal(), &config()).unwrap();

    assert!(solution.achievable_target >= 150_000.0);
    assert!(solution.achievable_target <= 600_000.0);
    assert_eq!(
        solution.delta_from_current,
        solution.achievable_target - 300_000.0
    );
}

#[test]
fn test_solve_target_amount_rejects_nonpositive_target() {
    let mut goal = baseline_goal();
    goal.target_amount = 0.0;
    assert!(matches!(
        solve_target_amount(&goal, &config()),
        Err(ValidationError::InvalidParameter {
            field: "target_amount",
            ..
        })
    ));
}

#[test]
fn test_solve_withdrawal_rate_defaults() {
    let market = RetirementMarket {
        annual_return: 0.05,
        annual_volatility: 0.08,
        inflation_rate: 0.02,
    };
    let solution =
        solve_withdrawal_rate(1_000_000.0, 30, 40_000.0, &market, None, &config()).unwrap();

    assert!(solution.safe_rate >= 0.01);
    assert!(solution.safe_rate <= 0.10);
    assert!(
        (solution.annual_withdrawal - solution.safe_rate * 1_000_000.0).abs() < 1e-9
    );
    assert!((solution.delta_vs_four_percent - (solution.safe_rate - 0.04)).abs() < 1e-12);
    if solution.outcome.is_success() {
        assert_eq!(
            solution.covers_expenses,
            solution.annual_withdrawal >= 40_000.0
        );
    }
}

#[test]
fn test_solve_withdrawal_rate_hopeless_portfolio() {
    // Withdrawing at least 1% of a portfolio that must last 40 years at a
    // negative real return cannot hold up; expect a structured failure.
    let market = RetirementMarket {
        annual_return: -0.05,
        annual_volatility: 0.02,
        inflation_rate: 0.04,
    };
    let solution = solve_withdrawal_rate(
        100_000.0,
        40,
        50_000.0,
        &market,
        Some((0.08, 0.10)),
        &config(),
    )
    .unwrap();

    assert!(!solution.outcome.is_success());
    assert!(solution.outcome.message.is_some());
    assert!(!solution.covers_expenses);
}

#[test]
fn test_solve_withdrawal_rate_rejects_inverted_bounds() {
    let market = RetirementMarket {
        annual_return: 0.05,
        annual_volatility: 0.08,
        inflation_rate: 0.02,
    };
    assert!(matches!(
        solve_withdrawal_rate(1_000_000.0, 30, 40_000.0, &market, Some((0.10, 0.05)), &config()),
        Err(ValidationError::InvalidBounds {
            field: "withdrawal_rate",
            ..
        })
    ));
}

#[test]
fn test_solvers_leave_goal_untouched() {
    let goal = baseline_goal();
    let _ = solve_contribution(&goal, &config()).unwrap();
    let _ = solve_target_amount(&goal, &config()).unwrap();
    assert_eq!(goal, baseline_goal());
}

#[test]
fn test_evaluator_counts_work() {
    let goal = baseline_goal();
    let mut eval = TrialEvaluator::with_seed(&goal, Some(5));
    let _ = eval
        .probability(PlanVariable::MonthlyContribution, 800.0, 500)
        .unwrap();
    let _ = eval
        .probability(PlanVariable::MonthlyContribution, 1_200.0, 500)
        .unwrap();
    assert_eq!(eval.evaluations(), 2);
    assert_eq!(eval.simulations(), 1_000);
}
