use tracing::{debug, info};

use crate::error::ValidationError;
use crate::evaluate::TrialEvaluator;
use crate::model::{GoalSnapshot, PlanVariable};
use crate::solver::config::SolverConfig;
use crate::solver::result::{SolverOutcome, TimelineSolution};

fn default_min_age() -> u32 {
    50
}

fn default_max_age() -> u32 {
    75
}

/// Retirement-age bounds for the timeline solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineOptions {
    pub min_age: u32,
    pub max_age: u32,
    /// When the plan's stated retirement age is itself feasible and later
    /// than the earliest feasible age, report the stated age instead of
    /// pulling the plan earlier. Off by default: the primary contract is
    /// the earliest feasible age within bounds.
    pub prefer_stated_age: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        TimelineOptions {
            min_age: default_min_age(),
            max_age: default_max_age(),
            prefer_stated_age: false,
        }
    }
}

/// Find the earliest whole-year retirement age that reaches the target
/// probability.
///
/// Age is discrete, so this is a linear scan upward from the lower bound.
/// Moving the retirement age also moves the accumulation horizon; ages at
/// or below the implied current age are skipped.
pub fn solve_timeline(
    goal: &GoalSnapshot,
    config: &SolverConfig,
    options: &TimelineOptions,
) -> Result<TimelineSolution, ValidationError> {
    if options.min_age >= options.max_age {
        return Err(ValidationError::InvalidBounds {
            field: "retirement_age",
            min: options.min_age as f64,
            max: options.max_age as f64,
        });
    }
    let current_age = goal.current_age();
    if options.max_age as f64 <= current_age {
        return Err(ValidationError::InvalidParameter {
            field: "retirement_age",
            value: options.max_age as f64,
            reason: "age bounds must lie above the implied current age",
        });
    }

    let variable = PlanVariable::RetirementAge;
    let target = config.target_probability;
    let relaxed = target - config.effective_tolerance();
    let mut eval = TrialEvaluator::with_seed(goal, config.seed);

    let mut found: Option<u32> = None;
    let mut best: (u32, f64) = (options.max_age, 0.0);
    for age in options.min_age..=options.max_age {
        if (age as f64) <= current_age {
            continue;
        }
        let p = eval.probability(variable, age as f64, config.search_iterations)?;
        debug!(age, probability = p, "timeline probe");
        if p > best.1 {
            best = (age, p);
        }
        if p >= relaxed {
            found = Some(age);
            break;
        }
    }

    let Some(mut age) = found else {
        let (best_age, best_p) = best;
        let outcome = SolverOutcome::no_solution(
            best_age as f64,
            best_p,
            eval.evaluations(),
            eval.simulations(),
            format!(
                "no retirement age in [{}, {}] reaches {:.0}% success (best {:.1}% at {best_age})",
                options.min_age,
                options.max_age,
                target * 100.0,
                best_p * 100.0
            ),
        );
        return Ok(TimelineSolution {
            outcome,
            required_age: best_age,
            required_years: best_age as f64 - current_age,
            can_retire_earlier: false,
        });
    };

    if options.prefer_stated_age {
        let stated = goal.retirement_age.round() as u32;
        if stated > age && stated <= options.max_age {
            let p = eval.probability(variable, stated as f64, config.search_iterations)?;
            if p >= relaxed {
                age = stated;
            }
        }
    }

    let raw = eval.probability(variable, age as f64, config.confirm_iterations)?;
    let outcome = if raw >= relaxed {
        SolverOutcome::success(age as f64, raw, target, eval.evaluations(), eval.simulations())
    } else {
        // Confirmation disagreed with the cheap scan; report the candidate
        // rather than pretend it works.
        SolverOutcome::no_solution(
            age as f64,
            raw,
            eval.evaluations(),
            eval.simulations(),
            format!(
                "age {age} passed the search but confirmed at only {:.1}%",
                raw * 100.0
            ),
        )
    };
    info!(
        age,
        probability = outcome.raw_probability,
        success = outcome.is_success(),
        "timeline solve finished"
    );

    Ok(TimelineSolution {
        required_age: age,
        required_years: age as f64 - current_age,
        can_retire_earlier: outcome.is_success() && (age as f64) < goal.retirement_age,
        outcome,
    })
}
