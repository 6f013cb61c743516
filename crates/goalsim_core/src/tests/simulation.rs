//! Tests for Monte Carlo engine mechanics and edge cases

use crate::error::ValidationError;
use crate::model::SimulationParameters;
use crate::simulation;

fn scenario() -> SimulationParameters {
    SimulationParameters {
        initial_value: 100_000.0,
        monthly_contribution: 500.0,
        monthly_withdrawal: 0.0,
        annual_return: 0.07,
        annual_volatility: 0.12,
        inflation_rate: 0.0,
        years: 20.0,
        goal_amount: 300_000.0,
        iterations: 5_000,
        seed: Some(42),
    }
}

#[test]
fn test_twenty_year_accumulation_scenario() {
    let result = simulation::run(&scenario()).unwrap();

    assert!(result.success_probability > 0.0);
    assert!(result.success_probability < 1.0);
    assert!(result.summary.median > 100_000.0);
    assert_eq!(result.terminal_values.len(), 5_000);
    assert_eq!(result.yearly_projection.len(), 20);
    assert_eq!(result.iterations_run, 5_000);
}

#[test]
fn test_trivial_goal_short_circuits() {
    let params = SimulationParameters {
        goal_amount: 0.0,
        ..scenario()
    };
    let result = simulation::run(&params).unwrap();

    assert_eq!(result.success_probability, 1.0);
    assert_eq!(result.iterations_run, 0);
    assert!(result.terminal_values.is_empty());
    assert!(result.yearly_projection.is_empty());
}

#[test]
fn test_zero_volatility_is_deterministic() {
    let params = SimulationParameters {
        annual_volatility: 0.0,
        iterations: 200,
        seed: None,
        ..scenario()
    };
    let result = simulation::run(&params).unwrap();

    // Every path should follow the same compounding trajectory.
    let first = result.terminal_values[0];
    for v in &result.terminal_values {
        assert!((v - first).abs() < 1e-6);
    }

    // And that trajectory matches the zero-noise GBM increment, which is
    // exp(monthly_return) each month.
    let monthly_return = 1.07_f64.powf(1.0 / 12.0) - 1.0;
    let growth = monthly_return.exp();
    let mut expected = 100_000.0;
    for _ in 0..240 {
        expected = expected * growth + 500.0;
    }
    assert!(
        (first - expected).abs() / expected < 1e-9,
        "terminal {first} vs expected {expected}"
    );
}

#[test]
fn test_fixed_seed_reproduces_results() {
    let a = simulation::run(&scenario()).unwrap();
    let b = simulation::run(&scenario()).unwrap();
    assert_eq!(a.terminal_values, b.terminal_values);
    assert_eq!(a.success_probability, b.success_probability);
}

#[test]
fn test_probability_monotone_in_contribution() {
    let low = SimulationParameters {
        monthly_contribution: 200.0,
        iterations: 2_000,
        seed: Some(7),
        ..scenario()
    };
    let high = SimulationParameters {
        monthly_contribution: 2_000.0,
        ..low.clone()
    };

    let p_low = simulation::run(&low).unwrap().success_probability;
    let p_high = simulation::run(&high).unwrap().success_probability;
    assert!(
        p_high >= p_low,
        "higher contribution should not lower success ({p_high} < {p_low})"
    );
}

#[test]
fn test_probability_monotone_in_withdrawal() {
    let base = SimulationParameters {
        initial_value: 500_000.0,
        monthly_contribution: 0.0,
        monthly_withdrawal: 1_000.0,
        goal_amount: 100_000.0,
        iterations: 2_000,
        seed: Some(11),
        ..scenario()
    };
    let heavy = SimulationParameters {
        monthly_withdrawal: 4_000.0,
        ..base.clone()
    };

    let p_light = simulation::run(&base).unwrap().success_probability;
    let p_heavy = simulation::run(&heavy).unwrap().success_probability;
    assert!(p_heavy <= p_light);
}

#[test]
fn test_withdrawals_deplete_to_absorbing_zero() {
    let params = SimulationParameters {
        initial_value: 10_000.0,
        monthly_contribution: 0.0,
        monthly_withdrawal: 2_000.0,
        annual_return: 0.05,
        annual_volatility: 0.0,
        inflation_rate: 0.0,
        years: 5.0,
        goal_amount: 1.0,
        iterations: 100,
        seed: Some(3),
    };
    let result = simulation::run(&params).unwrap();

    assert_eq!(result.success_probability, 0.0);
    assert!(result.terminal_values.iter().all(|v| *v == 0.0));
    assert_eq!(result.summary.probability_of_loss, 1.0);
    // Depletion happens within the first year, so every cross-section
    // after it sits at zero.
    let last = result.yearly_projection.last().unwrap();
    assert_eq!(last.median, 0.0);
    assert_eq!(last.p90, 0.0);
}

#[test]
fn test_yearly_projection_percentiles_are_ordered() {
    let result = simulation::run(&scenario()).unwrap();
    for year in &result.yearly_projection {
        assert!(year.p10 <= year.p25);
        assert!(year.p25 <= year.median);
        assert!(year.median <= year.p75);
        assert!(year.p75 <= year.p90);
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let zero_iterations = SimulationParameters {
        iterations: 0,
        ..scenario()
    };
    assert!(matches!(
        simulation::run(&zero_iterations),
        Err(ValidationError::InvalidParameter {
            field: "iterations",
            ..
        })
    ));

    let zero_horizon = SimulationParameters {
        years: 0.0,
        ..scenario()
    };
    assert!(matches!(
        simulation::run(&zero_horizon),
        Err(ValidationError::InvalidParameter { field: "years", .. })
    ));

    let negative_volatility = SimulationParameters {
        annual_volatility: -0.1,
        ..scenario()
    };
    assert!(matches!(
        simulation::run(&negative_volatility),
        Err(ValidationError::InvalidParameter {
            field: "annual_volatility",
            ..
        })
    ));
}
