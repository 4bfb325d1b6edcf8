//! Required sample size for estimating a proportion
//!
//! n₀ = Z² · p · (1 − p) / e², optionally reduced by the finite population
//! correction n = n₀ / (1 + (n₀ − 1) / N), capped at n₀. Below one
//! interview the correction's denominator drops under 1 and would inflate n.

use crate::domain::confidence::ConfidenceLevel;
use crate::domain::constants::sample_size::{
    MAX_MARGIN_OF_ERROR, MAX_PROPORTION, MIN_MARGIN_OF_ERROR, MIN_PROPORTION,
};
use crate::domain::numeric::clamp;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs to the sample size estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeInput {
    /// Population size; 0 means unknown or effectively infinite
    #[serde(default)]
    pub population: u64,
    /// Expected proportion p
    pub expected_proportion: f64,
    /// Margin of error as a fraction (0.05 for ±5%)
    pub margin_of_error: f64,
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
}

/// Output of the sample size estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeResult {
    /// Required sample size before rounding
    pub required_n: f64,
    /// Sample size under the infinite population assumption
    pub unadjusted_n: f64,
    pub finite_population_correction_applied: bool,
    /// Proportion actually used after clamping
    pub proportion_used: f64,
    /// Margin of error actually used after clamping
    pub margin_of_error_used: f64,
}

impl SampleSizeResult {
    /// Whole number of interviews to field, rounded up so the target
    /// precision is never missed
    pub fn recommended_n(&self) -> u64 {
        self.required_n.ceil() as u64
    }
}

/// Estimate the sample size needed to measure a proportion
///
/// Never fails: proportion and margin are clamped into their working ranges.
pub fn estimate_sample_size(input: &SampleSizeInput) -> SampleSizeResult {
    let z = input.confidence_level.critical_value();
    let p = clamp(input.expected_proportion, MIN_PROPORTION, MAX_PROPORTION);
    let e = clamp(input.margin_of_error, MIN_MARGIN_OF_ERROR, MAX_MARGIN_OF_ERROR);

    let unadjusted_n = z * z * p * (1.0 - p) / (e * e);

    let finite_population_correction_applied = input.population > 0;
    let required_n = if finite_population_correction_applied {
        let corrected = unadjusted_n / (1.0 + (unadjusted_n - 1.0) / input.population as f64);
        corrected.min(unadjusted_n)
    } else {
        unadjusted_n
    };

    debug!(
        unadjusted_n,
        required_n, finite_population_correction_applied, "Estimated sample size"
    );

    SampleSizeResult {
        required_n,
        unadjusted_n,
        finite_population_correction_applied,
        proportion_used: p,
        margin_of_error_used: e,
    }
}
