use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn default_iterations() -> usize {
    1_000
}

/// Inputs for a single Monte Carlo projection.
///
/// All rates are annual decimal fractions (0.07 for 7%). Cash flows are
/// monthly amounts in today's dollars; both are scaled by cumulative
/// inflation as the projection advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Starting portfolio value
    pub initial_value: f64,
    /// Monthly deposit, inflation-adjusted over time
    #[serde(default)]
    pub monthly_contribution: f64,
    /// Monthly withdrawal, inflation-adjusted over time
    #[serde(default)]
    pub monthly_withdrawal: f64,
    /// Expected annual return
    pub annual_return: f64,
    /// Annual return volatility (standard deviation)
    pub annual_volatility: f64,
    /// Annual inflation rate
    #[serde(default)]
    pub inflation_rate: f64,
    /// Projection horizon in years
    pub years: f64,
    /// Terminal value a path must reach to count as a success
    #[serde(default)]
    pub goal_amount: f64,
    /// Number of Monte Carlo paths
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Fixed RNG seed for reproducible runs; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            initial_value: 0.0,
            monthly_contribution: 0.0,
            monthly_withdrawal: 0.0,
            annual_return: 0.07,
            annual_volatility: 0.15,
            inflation_rate: 0.02,
            years: 30.0,
            goal_amount: 0.0,
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.iterations == 0 {
            return Err(ValidationError::InvalidParameter {
                field: "iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !self.years.is_finite() || self.years <= 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "years",
                value: self.years,
                reason: "horizon must be a positive number of years",
            });
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "annual_volatility",
                value: self.annual_volatility,
                reason: "volatility must be non-negative",
            });
        }
        if !self.annual_return.is_finite() || self.annual_return <= -1.0 {
            return Err(ValidationError::InvalidParameter {
                field: "annual_return",
                value: self.annual_return,
                reason: "return must be a finite rate above -100%",
            });
        }
        if !self.inflation_rate.is_finite() || self.inflation_rate <= -1.0 {
            return Err(ValidationError::InvalidParameter {
                field: "inflation_rate",
                value: self.inflation_rate,
                reason: "inflation must be a finite rate above -100%",
            });
        }
        if !self.initial_value.is_finite() || self.initial_value < 0.0 {
            return Err(ValidationError::InvalidParameter {
                field: "initial_value",
                value: self.initial_value,
                reason: "starting value must be non-negative",
            });
        }
        Ok(())
    }

    /// Horizon length in whole months, at least one.
    pub fn months(&self) -> usize {
        ((self.years * 12.0).round() as usize).max(1)
    }
}
