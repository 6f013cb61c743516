use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::params::SimulationParameters;

/// Point-in-time view of a financial goal.
///
/// Solvers and sensitivity sweeps treat this as the immutable baseline;
/// every trial works on its own clone with exactly one (or two) fields
/// substituted via [`PlanVariable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Current portfolio value
    pub current_amount: f64,
    /// Monthly contribution toward the goal
    pub monthly_contribution: f64,
    /// Target portfolio value at the goal date
    pub target_amount: f64,
    /// Planned retirement age
    pub retirement_age: f64,
    /// Life expectancy, bounds the retirement phase
    pub life_expectancy: f64,
    /// Years remaining until the goal date
    pub years_to_goal: f64,
    /// Annual inflation rate
    pub inflation_rate: f64,
    /// Blended expected annual return of the portfolio
    pub expected_return: f64,
    /// Annual volatility of the portfolio
    pub volatility: f64,
}

impl GoalSnapshot {
    /// Age implied by the retirement age and remaining horizon.
    pub fn current_age(&self) -> f64 {
        self.retirement_age - self.years_to_goal
    }

    /// Value of one plan variable.
    pub fn value_of(&self, variable: PlanVariable) -> f64 {
        match variable {
            PlanVariable::MonthlyContribution => self.monthly_contribution,
            PlanVariable::TargetAmount => self.target_amount,
            PlanVariable::RetirementAge => self.retirement_age,
            PlanVariable::LifeExpectancy => self.life_expectancy,
            PlanVariable::YearsToGoal => self.years_to_goal,
            PlanVariable::ExpectedReturn => self.expected_return,
            PlanVariable::Volatility => self.volatility,
            PlanVariable::InflationRate => self.inflation_rate,
        }
    }

    /// Overwrite one plan variable in place.
    ///
    /// Moving the retirement age shifts the horizon by the same amount so
    /// the implied current age stays fixed.
    pub fn set_value(&mut self, variable: PlanVariable, value: f64) {
        match variable {
            PlanVariable::MonthlyContribution => self.monthly_contribution = value,
            PlanVariable::TargetAmount => self.target_amount = value,
            PlanVariable::RetirementAge => {
                self.years_to_goal += value - self.retirement_age;
                self.retirement_age = value;
            }
            PlanVariable::LifeExpectancy => self.life_expectancy = value,
            PlanVariable::YearsToGoal => self.years_to_goal = value,
            PlanVariable::ExpectedReturn => self.expected_return = value,
            PlanVariable::Volatility => self.volatility = value,
            PlanVariable::InflationRate => self.inflation_rate = value,
        }
    }

    /// Clone with one plan variable substituted.
    #[must_use]
    pub fn with_value(&self, variable: PlanVariable, value: f64) -> Self {
        let mut trial = self.clone();
        trial.set_value(variable, value);
        trial
    }

    /// Simulation inputs for the accumulation phase of this goal.
    pub fn to_parameters(&self, iterations: usize, seed: Option<u64>) -> SimulationParameters {
        SimulationParameters {
            initial_value: self.current_amount,
            monthly_contribution: self.monthly_contribution,
            monthly_withdrawal: 0.0,
            annual_return: self.expected_return,
            annual_volatility: self.volatility,
            inflation_rate: self.inflation_rate,
            years: self.years_to_goal,
            goal_amount: self.target_amount,
            iterations,
            seed,
        }
    }
}

/// The fixed set of goal fields that solvers and sweeps may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanVariable {
    MonthlyContribution,
    TargetAmount,
    RetirementAge,
    LifeExpectancy,
    YearsToGoal,
    ExpectedReturn,
    Volatility,
    InflationRate,
}

impl PlanVariable {
    pub const ALL: [PlanVariable; 8] = [
        PlanVariable::MonthlyContribution,
        PlanVariable::TargetAmount,
        PlanVariable::RetirementAge,
        PlanVariable::LifeExpectancy,
        PlanVariable::YearsToGoal,
        PlanVariable::ExpectedReturn,
        PlanVariable::Volatility,
        PlanVariable::InflationRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanVariable::MonthlyContribution => "monthly_contribution",
            PlanVariable::TargetAmount => "target_amount",
            PlanVariable::RetirementAge => "retirement_age",
            PlanVariable::LifeExpectancy => "life_expectancy",
            PlanVariable::YearsToGoal => "years_to_goal",
            PlanVariable::ExpectedReturn => "expected_return",
            PlanVariable::Volatility => "volatility",
            PlanVariable::InflationRate => "inflation_rate",
        }
    }
}

impl fmt::Display for PlanVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanVariable {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanVariable::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| AnalysisError::UnknownVariable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GoalSnapshot {
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

    #[test]
    fn with_value_leaves_baseline_untouched() {
        let base = snapshot();
        let trial = base.with_value(PlanVariable::MonthlyContribution, 2_000.0);
        assert_eq!(trial.monthly_contribution, 2_000.0);
        assert_eq!(base.monthly_contribution, 500.0);
        assert_eq!(base, snapshot());
    }

    #[test]
    fn retirement_age_shifts_horizon() {
        let trial = snapshot().with_value(PlanVariable::RetirementAge, 60.0);
        assert_eq!(trial.years_to_goal, 15.0);
        assert_eq!(trial.current_age(), 45.0);
    }

    #[test]
    fn variable_names_round_trip() {
        for v in PlanVariable::ALL {
            assert_eq!(v.name().parse::<PlanVariable>().unwrap(), v);
        }
    }

    #[test]
    fn unknown_variable_is_rejected() {
        let err = "frobnicate".parse::<PlanVariable>().unwrap_err();
        assert_eq!(err, AnalysisError::UnknownVariable("frobnicate".into()));
    }
}
