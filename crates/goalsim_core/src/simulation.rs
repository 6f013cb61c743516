//! Monte Carlo projection engine.
//!
//! Paths follow geometric Brownian motion at monthly resolution with
//! inflation-scaled cash flows and an absorbing barrier at zero. Work is
//! split into fixed-size batches, each with its own seeded RNG, so results
//! are reproducible for a given seed whether or not the `parallel` feature
//! is enabled.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::trace;

use crate::error::ValidationError;
use crate::model::{DistributionSummary, SimulationParameters, SimulationResult, YearlyProjection};
use crate::stats;

/// Paths per RNG batch. Keeps per-batch state small while giving the
/// scheduler enough chunks to balance across threads.
const MAX_BATCH_SIZE: usize = 100;

/// Mixing constant applied to the batch index when deriving batch seeds.
const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

struct PathSample {
    terminal: f64,
    yearly: Vec<f64>,
}

/// Run a full Monte Carlo projection.
///
/// A non-positive goal amount is already met and short-circuits to a
/// trivial success with no paths simulated.
pub fn run(params: &SimulationParameters) -> Result<SimulationResult, ValidationError> {
    params.validate()?;
    if params.goal_amount <= 0.0 {
        return Ok(SimulationResult::trivial_success());
    }

    let months = params.months();
    let years = months / 12;
    let monthly_return = (1.0 + params.annual_return).powf(1.0 / 12.0) - 1.0;
    let monthly_vol = params.annual_volatility / 12.0_f64.sqrt();
    let monthly_inflation = (1.0 + params.inflation_rate).powf(1.0 / 12.0) - 1.0;
    // Zero volatility collapses the distribution to its mean, which gives
    // the deterministic compounding path.
    let step = Normal::new(monthly_return - 0.5 * monthly_vol * monthly_vol, monthly_vol)
        .map_err(|_| ValidationError::InvalidParameter {
            field: "annual_volatility",
            value: params.annual_volatility,
            reason: "volatility produced an invalid distribution",
        })?;

    let iterations = params.iterations;
    let base_seed = params.seed.unwrap_or_else(|| rand::rng().random());
    let num_batches = iterations.div_ceil(MAX_BATCH_SIZE);

    let simulate_batch = |batch: usize| -> Vec<PathSample> {
        let mut rng = SmallRng::seed_from_u64(base_seed ^ (batch as u64).wrapping_mul(SEED_MIX));
        let start = batch * MAX_BATCH_SIZE;
        let batch_size = MAX_BATCH_SIZE.min(iterations - start);
        (0..batch_size)
            .map(|_| simulate_path(params, months, years, &step, monthly_inflation, &mut rng))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let paths: Vec<PathSample> = (0..num_batches)
        .into_par_iter()
        .flat_map(simulate_batch)
        .collect();
    #[cfg(not(feature = "parallel"))]
    let paths: Vec<PathSample> = (0..num_batches).flat_map(simulate_batch).collect();

    let mut terminal_values = Vec::with_capacity(iterations);
    let mut year_slices: Vec<Vec<f64>> = vec![Vec::with_capacity(iterations); years];
    for path in paths {
        terminal_values.push(path.terminal);
        for (year, value) in path.yearly.into_iter().enumerate() {
            year_slices[year].push(value);
        }
    }

    let successes = terminal_values
        .iter()
        .filter(|v| **v >= params.goal_amount)
        .count();
    let success_probability = (successes as f64 / iterations as f64).clamp(0.0, 1.0);
    trace!(
        iterations,
        successes,
        probability = success_probability,
        "simulation complete"
    );

    let yearly_projection = year_slices
        .into_iter()
        .enumerate()
        .map(|(i, mut values)| {
            values.sort_by(f64::total_cmp);
            YearlyProjection {
                year: i + 1,
                median: stats::percentile(&values, 50.0),
                p10: stats::percentile(&values, 10.0),
                p25: stats::percentile(&values, 25.0),
                p75: stats::percentile(&values, 75.0),
                p90: stats::percentile(&values, 90.0),
            }
        })
        .collect();

    let summary = DistributionSummary::from_samples(&terminal_values, params.initial_value);

    Ok(SimulationResult {
        success_probability,
        terminal_values,
        yearly_projection,
        summary,
        iterations_run: iterations,
    })
}

/// Advance one path across the full horizon.
///
/// Cash flows apply after the month's return. A path that reaches zero is
/// absorbed: it stops sampling and stays at zero for the remaining months.
fn simulate_path(
    params: &SimulationParameters,
    months: usize,
    years: usize,
    step: &Normal<f64>,
    monthly_inflation: f64,
    rng: &mut SmallRng,
) -> PathSample {
    let mut value = params.initial_value;
    let mut inflation_factor = 1.0;
    let mut depleted = false;
    let mut yearly = Vec::with_capacity(years);

    for month in 1..=months {
        if !depleted {
            let growth = step.sample(rng).exp();
            inflation_factor *= 1.0 + monthly_inflation;
            value = value * growth
                + (params.monthly_contribution - params.monthly_withdrawal) * inflation_factor;
            if value <= 0.0 {
                value = 0.0;
                depleted = true;
            }
        }
        if month % 12 == 0 && yearly.len() < years {
            yearly.push(value);
        }
    }

    PathSample {
        terminal: value,
        yearly,
    }
}
