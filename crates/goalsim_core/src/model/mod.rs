//! Data model: simulation inputs, goal snapshots and result types.

mod goal;
mod params;
mod results;

pub use goal::{GoalSnapshot, PlanVariable};
pub use params::SimulationParameters;
pub use results::{DistributionSummary, SimulationResult, YearlyProjection};
