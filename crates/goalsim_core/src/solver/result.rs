use serde::{Deserialize, Serialize};

/// Whether a solve found a workable value within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Success,
    NoSolution,
}

/// Common outcome of every scalar solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    pub status: SolverStatus,
    /// Solved value on success; best candidate examined otherwise
    pub value: f64,
    /// Probability to report for the solved value. On success this is
    /// never below the target, while [`raw_probability`] keeps the
    /// unclamped confirmation estimate.
    ///
    /// [`raw_probability`]: SolverOutcome::raw_probability
    pub achieved_probability: f64,
    /// Confirmation-run probability as measured
    pub raw_probability: f64,
    /// Probability evaluations performed by the search
    pub evaluations: usize,
    /// Total Monte Carlo paths simulated
    pub simulations_run: usize,
    /// Human-readable explanation when no solution exists
    pub message: Option<String>,
}

impl SolverOutcome {
    pub(crate) fn success(
        value: f64,
        raw_probability: f64,
        target_probability: f64,
        evaluations: usize,
        simulations_run: usize,
    ) -> Self {
        SolverOutcome {
            status: SolverStatus::Success,
            value,
            achieved_probability: raw_probability.max(target_probability),
            raw_probability,
            evaluations,
            simulations_run,
            message: None,
        }
    }

    pub(crate) fn no_solution(
        best_value: f64,
        raw_probability: f64,
        evaluations: usize,
        simulations_run: usize,
        message: String,
    ) -> Self {
        SolverOutcome {
            status: SolverStatus::NoSolution,
            value: best_value,
            achieved_probability: raw_probability,
            raw_probability,
            evaluations,
            simulations_run,
            message: Some(message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SolverStatus::Success
    }
}

/// Result of solving for the required monthly contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSolution {
    pub outcome: SolverOutcome,
    /// Monthly contribution that reaches the target probability
    pub required_contribution: f64,
    /// Change versus the plan's current contribution
    pub monthly_delta: f64,
}

/// Result of solving for the earliest workable retirement age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSolution {
    pub outcome: SolverOutcome,
    /// Earliest whole-year age at which the plan works
    pub required_age: u32,
    /// Years between the implied current age and the required age
    pub required_years: f64,
    /// True when the required age is earlier than the plan's stated age
    pub can_retire_earlier: bool,
}

/// Result of solving for an achievable target amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAmountSolution {
    pub outcome: SolverOutcome,
    /// Target amount reachable at the required confidence
    pub achievable_target: f64,
    /// Change versus the plan's stated target
    pub delta_from_current: f64,
}

/// Result of solving for a sustainable withdrawal rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalSolution {
    pub outcome: SolverOutcome,
    /// Highest annual withdrawal rate that survives retirement
    pub safe_rate: f64,
    /// First-year withdrawal in dollars at the safe rate
    pub annual_withdrawal: f64,
    /// Safe rate minus the classic 4% rule
    pub delta_vs_four_percent: f64,
    /// Whether the safe withdrawal covers the stated annual expenses
    pub covers_expenses: bool,
}
