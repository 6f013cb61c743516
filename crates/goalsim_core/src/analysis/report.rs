use serde::{Deserialize, Serialize};

use crate::model::PlanVariable;

/// One sampled point of a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: f64,
    pub probability: f64,
}

/// One bar of a tornado chart: a variable, its sampled range and the
/// probability swing it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoEntry {
    pub variable: PlanVariable,
    pub baseline: f64,
    pub points: Vec<SensitivityPoint>,
    /// Max minus min probability over the sampled points
    pub impact_range: f64,
}

/// Two-variable probability surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub variable_x: PlanVariable,
    pub variable_y: PlanVariable,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    /// `probabilities[i][j]` is the cell at `x_values[i]`, `y_values[j]`
    pub probabilities: Vec<Vec<f64>>,
    pub min_probability: f64,
    pub max_probability: f64,
    /// Contour levels that fall inside the observed probability range
    pub contour_levels: Vec<f64>,
}

/// Location of the single value of one variable that reaches the target
/// probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub variable: PlanVariable,
    pub converged: bool,
    /// Threshold on success; best candidate examined otherwise
    pub threshold: f64,
    pub baseline: f64,
    /// Threshold minus baseline
    pub delta: f64,
    /// Delta as a percentage of the baseline; zero for a zero baseline
    pub percent_delta: f64,
    /// Probability to report at the threshold
    pub achieved_probability: f64,
    /// Confirmation-run probability as measured
    pub raw_probability: f64,
    pub evaluations: usize,
    pub message: Option<String>,
}

/// One solved point on a break-even curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenPoint {
    pub swept_value: f64,
    pub solved_value: f64,
    pub probability: f64,
}

/// Where the caller's current plan sits relative to the break-even curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEvenAssessment {
    /// The current plan clears the curve at the nearest swept value
    Above,
    /// The current plan falls short of the curve at the nearest swept value
    AtRisk,
    /// No point of the sweep produced a solvable iso-probability value
    OffCurve,
}

/// Iso-probability curve over two plan variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenCurve {
    pub variable_swept: PlanVariable,
    pub variable_solved: PlanVariable,
    pub target_probability: f64,
    /// Solved curve points in sweep order; swept values whose solve found
    /// no crossing are omitted
    pub points: Vec<BreakEvenPoint>,
    pub assessment: BreakEvenAssessment,
}
