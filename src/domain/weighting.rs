//! Weighting impact analysis
//!
//! Cell weights are target share ÷ sample share. The variance inflation they
//! cause is summarised by the design effect DEFF = 1 + CV(w)², and the
//! precision that survives weighting by n_eff = n / DEFF.

use crate::domain::constants::PERCENT;
use crate::domain::types::{InterviewCount, Percentage, Proportion, SegmentLabel};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One row of the weighting table
///
/// Shares are un-normalized (percentages, counts, anything proportional);
/// they are rescaled to sum to 1 across all segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub label: SegmentLabel,
    pub sample_share: f64,
    pub target_share: f64,
    /// Outcome rate for this segment in percent, when measuring a metric shift
    #[serde(default)]
    pub outcome_percent: Option<f64>,
}

impl Segment {
    pub fn new(label: &str, sample_share: f64, target_share: f64) -> Self {
        Self {
            label: SegmentLabel::new(label.to_string()),
            sample_share,
            target_share,
            outcome_percent: None,
        }
    }

    pub fn with_outcome(mut self, outcome_percent: f64) -> Self {
        self.outcome_percent = Some(outcome_percent);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingInput {
    /// Signed so that a negative count is reported as invalid input
    pub total_interviews: i64,
    pub segments: Vec<Segment>,
}

/// A segment after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSegment {
    pub label: SegmentLabel,
    pub sample_proportion: Proportion,
    pub target_proportion: Proportion,
    /// Target ÷ sample; 0 when the segment is absent from the sample
    pub weight: f64,
}

/// Headline metric before and after weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeShift {
    pub unweighted: Proportion,
    pub weighted: Proportion,
}

impl OutcomeShift {
    /// Signed shift in percentage points (weighted − unweighted)
    pub fn shift_points(&self) -> f64 {
        (self.weighted.into_inner() - self.unweighted.into_inner()) * PERCENT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingResult {
    pub segments: Vec<WeightedSegment>,
    pub design_effect: f64,
    pub effective_sample_size: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub outcome: Option<OutcomeShift>,
}

/// Analyze how weighting a sample to its targets affects precision
///
/// # Errors
///
/// `InvalidInput` when there are no segments or no interviews.
pub fn analyze_weighting(input: &WeightingInput) -> Result<WeightingResult> {
    if input.segments.is_empty() {
        return Err(Error::invalid_input(
            "segments",
            "at least one segment is required",
        ));
    }
    let total_interviews = InterviewCount::parse(input.total_interviews, "total_interviews")?;

    let sample = normalize(input.segments.iter().map(|s| s.sample_share), "sample");
    let target = normalize(input.segments.iter().map(|s| s.target_share), "target");

    let segments: Vec<WeightedSegment> = input
        .segments
        .iter()
        .zip(sample.into_iter().zip(target))
        .map(|(segment, (s, t))| WeightedSegment {
            label: segment.label.clone(),
            sample_proportion: Proportion::new(s),
            target_proportion: Proportion::new(t),
            weight: if s > 0.0 { t / s } else { 0.0 },
        })
        .collect();

    let mean_weight = match segments
        .iter()
        .map(|seg| seg.sample_proportion.into_inner() * seg.weight)
        .sum::<f64>()
    {
        m if m > 0.0 => m,
        _ => 1.0,
    };

    let cv_squared: f64 = segments
        .iter()
        .map(|seg| seg.sample_proportion.into_inner() * (seg.weight / mean_weight - 1.0).powi(2))
        .sum();
    let design_effect = 1.0 + cv_squared;
    let effective_sample_size = total_interviews.as_f64() / design_effect;

    let min_weight = segments
        .iter()
        .map(|seg| seg.weight)
        .fold(f64::INFINITY, f64::min);
    let max_weight = segments
        .iter()
        .map(|seg| seg.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    let outcome = input
        .segments
        .iter()
        .any(|segment| segment.outcome_percent.is_some())
        .then(|| outcome_shift(&input.segments, &segments));

    debug!(
        segments = segments.len(),
        design_effect, effective_sample_size, "Analyzed weighting impact"
    );

    Ok(WeightingResult {
        segments,
        design_effect,
        effective_sample_size,
        min_weight,
        max_weight,
        outcome,
    })
}

/// Negative or non-finite shares carry no mass
fn share(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Rescale a share column to sum to 1; a column with no mass normalizes to
/// all zeros
///
/// Shares are divided by the largest one before summing so that huge finite
/// inputs cannot overflow the total.
fn normalize(shares: impl Iterator<Item = f64>, column: &str) -> Vec<f64> {
    let shares: Vec<f64> = shares.map(share).collect();
    let largest = shares.iter().copied().fold(0.0, f64::max);
    if largest <= 0.0 {
        warn!(column, "Share column sums to zero; treating every segment as empty");
        return vec![0.0; shares.len()];
    }

    let scaled: Vec<f64> = shares.iter().map(|s| s / largest).collect();
    let total: f64 = scaled.iter().sum();
    scaled.into_iter().map(|s| s / total).collect()
}

fn outcome_shift(raw: &[Segment], normalized: &[WeightedSegment]) -> OutcomeShift {
    let (unweighted, weighted) =
        raw.iter()
            .zip(normalized)
            .fold((0.0, 0.0), |(unweighted, weighted), (segment, seg)| {
                let y = Percentage::new(segment.outcome_percent.unwrap_or(0.0))
                    .as_proportion()
                    .into_inner();
                (
                    unweighted + seg.sample_proportion.into_inner() * y,
                    weighted + seg.target_proportion.into_inner() * y,
                )
            });

    OutcomeShift {
        unweighted: Proportion::new(unweighted),
        weighted: Proportion::new(weighted),
    }
}
