use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::solver::config::SolverConfig;
use crate::solver::result::{SolverOutcome, WithdrawalSolution};

/// Default search range for the annual withdrawal rate.
pub const DEFAULT_RATE_BOUNDS: (f64, f64) = (0.01, 0.10);

/// Annual withdrawal trials per probability estimate during the search.
const SEARCH_TRIALS: usize = 1_000;

const FOUR_PERCENT_RULE: f64 = 0.04;

/// Market assumptions for the retirement phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementMarket {
    pub annual_return: f64,
    pub annual_volatility: f64,
    pub inflation_rate: f64,
}

/// Find the highest withdrawal rate that survives retirement at the
/// target probability.
///
/// Retirement drawdown is coarser than accumulation: a yearly model with
/// a fixed inflation-adjusted withdrawal is enough, so this solver runs
/// its own per-year simulator instead of the monthly engine. Survival
/// probability is non-increasing in the rate, which makes the search a
/// plain bisection from a feasible lower bound.
pub fn solve_withdrawal_rate(
    portfolio_value: f64,
    years_in_retirement: u32,
    annual_expenses: f64,
    market: &RetirementMarket,
    rate_bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> Result<WithdrawalSolution, ValidationError> {
    if !portfolio_value.is_finite() || portfolio_value <= 0.0 {
        return Err(ValidationError::InvalidParameter {
            field: "portfolio_value",
            value: portfolio_value,
            reason: "portfolio must be positive",
        });
    }
    if years_in_retirement == 0 {
        return Err(ValidationError::InvalidParameter {
            field: "years_in_retirement",
            value: 0.0,
            reason: "retirement must span at least one year",
        });
    }
    if !market.annual_volatility.is_finite() || market.annual_volatility < 0.0 {
        return Err(ValidationError::InvalidParameter {
            field: "annual_volatility",
            value: market.annual_volatility,
            reason: "volatility must be non-negative",
        });
    }
    let (min_rate, max_rate) = rate_bounds.unwrap_or(DEFAULT_RATE_BOUNDS);
    if min_rate >= max_rate {
        return Err(ValidationError::InvalidBounds {
            field: "withdrawal_rate",
            min: min_rate,
            max: max_rate,
        });
    }

    let target = config.target_probability;
    let relaxed = target - config.effective_tolerance();
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut evaluations = 0usize;
    let mut simulations = 0usize;
    let mut survival = |rate: f64, trials: usize| -> f64 {
        evaluations += 1;
        simulations += trials;
        let p = survival_probability(
            portfolio_value,
            years_in_retirement,
            rate,
            market,
            trials,
            base_seed,
        );
        debug!(rate, probability = p, "withdrawal probe");
        p
    };

    let p_min = survival(min_rate, SEARCH_TRIALS);
    if p_min < relaxed {
        let raw = survival(min_rate, config.confirm_iterations);
        let outcome = SolverOutcome::no_solution(
            min_rate,
            raw,
            evaluations,
            simulations,
            format!(
                "even the minimum rate {:.1}% survives only {:.1}% of trials",
                min_rate * 100.0,
                raw * 100.0
            ),
        );
        return Ok(solution(outcome, portfolio_value, annual_expenses));
    }

    // Bisection invariant: lo survives at the target, hi does not.
    let candidate = if survival(max_rate, SEARCH_TRIALS) >= relaxed {
        max_rate
    } else {
        let mut lo = min_rate;
        let mut hi = max_rate;
        for _ in 0..config.max_iterations {
            if hi - lo < 1e-4 {
                break;
            }
            let mid = f64::midpoint(lo, hi);
            if survival(mid, SEARCH_TRIALS) >= relaxed {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    };

    let raw = survival(candidate, config.confirm_iterations);
    let outcome = if raw >= relaxed {
        SolverOutcome::success(candidate, raw, target, evaluations, simulations)
    } else {
        SolverOutcome::no_solution(
            candidate,
            raw,
            evaluations,
            simulations,
            format!(
                "rate {:.2}% passed the search but confirmed at only {:.1}%",
                candidate * 100.0,
                raw * 100.0
            ),
        )
    };
    info!(
        rate = outcome.value,
        probability = outcome.raw_probability,
        success = outcome.is_success(),
        "withdrawal solve finished"
    );

    Ok(solution(outcome, portfolio_value, annual_expenses))
}

fn solution(
    outcome: SolverOutcome,
    portfolio_value: f64,
    annual_expenses: f64,
) -> WithdrawalSolution {
    let safe_rate = outcome.value;
    let annual_withdrawal = safe_rate * portfolio_value;
    WithdrawalSolution {
        safe_rate,
        annual_withdrawal,
        delta_vs_four_percent: safe_rate - FOUR_PERCENT_RULE,
        covers_expenses: outcome.is_success() && annual_withdrawal >= annual_expenses,
        outcome,
    }
}

/// Fraction of trials whose portfolio outlives retirement.
///
/// Each trial applies one sampled annual return, then withdraws the
/// inflation-adjusted first-year amount. A trial that hits zero before
/// the final year has failed.
fn survival_probability(
    portfolio_value: f64,
    years: u32,
    rate: f64,
    market: &RetirementMarket,
    trials: usize,
    seed: u64,
) -> f64 {
    // Degenerate distribution still works: std_dev 0 samples the mean.
    let Ok(annual_return) = Normal::new(market.annual_return, market.annual_volatility) else {
        return 0.0;
    };
    let base_withdrawal = rate * portfolio_value;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut survived = 0usize;

    for _ in 0..trials {
        let mut value = portfolio_value;
        let mut withdrawal = base_withdrawal;
        let mut alive = true;
        for _ in 0..years {
            value = value * (1.0 + annual_return.sample(&mut rng)) - withdrawal;
            if value <= 0.0 {
                alive = false;
                break;
            }
            withdrawal *= 1.0 + market.inflation_rate;
        }
        if alive {
            survived += 1;
        }
    }

    survived as f64 / trials as f64
}
