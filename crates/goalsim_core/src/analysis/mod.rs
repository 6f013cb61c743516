//! Sensitivity analysis over plan variables.
//!
//! Four sweeps answer "what moves this plan": tornado ranking
//! ([`one_way_sensitivity`]), probability heat maps
//! ([`two_way_sensitivity`]), single-variable thresholds
//! ([`threshold_analysis`]) and iso-probability break-even curves
//! ([`break_even_analysis`]). All of them walk their grids sequentially,
//! clone the baseline goal per trial, and honor cooperative cancellation
//! through [`SweepProgress`] between outer steps.

mod break_even;
mod config;
mod one_way;
mod progress;
mod report;
mod threshold;
mod two_way;

pub use break_even::break_even_analysis;
pub use config::{BreakEvenConfig, OneWayConfig, ThresholdConfig, TwoWayConfig};
pub use one_way::one_way_sensitivity;
pub use progress::SweepProgress;
pub use report::{
    BreakEvenAssessment, BreakEvenCurve, BreakEvenPoint, HeatmapGrid, SensitivityPoint,
    ThresholdResult, TornadoEntry,
};
pub use threshold::threshold_analysis;
pub use two_way::two_way_sensitivity;
