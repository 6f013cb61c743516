//! Stochastic financial goal projection.
//!
//! This crate answers goal-planning questions with Monte Carlo
//! simulation. It provides:
//! - A geometric-Brownian-motion projection engine at monthly resolution
//!   with inflation-scaled cash flows and absorbing depletion
//! - Goal solvers for required contribution, retirement timeline,
//!   achievable target amount and sustainable withdrawal rate
//! - Sensitivity analysis: tornado ranking, two-variable heat maps,
//!   threshold location and break-even curves
//!
//! ```ignore
//! use goalsim_core::model::SimulationParameters;
//! use goalsim_core::simulation;
//!
//! let result = simulation::run(&SimulationParameters {
//!     initial_value: 100_000.0,
//!     monthly_contribution: 500.0,
//!     annual_return: 0.07,
//!     annual_volatility: 0.12,
//!     years: 20.0,
//!     goal_amount: 300_000.0,
//!     ..SimulationParameters::default()
//! })?;
//! println!("success: {:.1}%", result.success_probability * 100.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod evaluate;
pub mod simulation;
pub mod solver;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

pub use error::{AnalysisError, ValidationError};
pub use model::{GoalSnapshot, PlanVariable, SimulationParameters, SimulationResult};
