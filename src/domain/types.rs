//! Shared value types for the calculators
//!
//! Rates and shares are sanitized into range on construction, so a value of
//! one of these types is always presentable. Counts that act as denominators
//! are validated instead, because a zero there has no meaningful fallback.

use crate::domain::constants::PERCENT;
use crate::domain::numeric::clamp;
use crate::error::{Error, Result};
use nutype::nutype;
#[allow(unused_imports)] // These are used by nutype derive macros
use serde::{Deserialize, Serialize};

/// A proportion in [0.0, 1.0]
///
/// Out-of-range input is clamped and NaN becomes 0.0.
#[nutype(
    sanitize(with = |value: f64| clamp(value, 0.0, 1.0)),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)
)]
pub struct Proportion(f64);

impl Proportion {
    /// Express as a percentage in [0, 100]
    pub fn as_percentage(&self) -> Percentage {
        Percentage::new(self.into_inner() * PERCENT)
    }
}

/// A percentage in [0.0, 100.0]
#[nutype(
    sanitize(with = |value: f64| clamp(value, 0.0, 100.0)),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)
)]
pub struct Percentage(f64);

impl Percentage {
    pub fn as_proportion(&self) -> Proportion {
        Proportion::new(self.into_inner() / PERCENT)
    }
}

/// Number of completed interviews in a sample; always at least one
#[nutype(
    validate(greater = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        Display
    )
)]
pub struct InterviewCount(u64);

impl InterviewCount {
    /// Validate a raw, possibly negative count, naming `field` in the error
    pub fn parse(raw: i64, field: &str) -> Result<Self> {
        u64::try_from(raw)
            .ok()
            .and_then(|count| Self::try_new(count).ok())
            .ok_or_else(|| Error::invalid_input(field, "must be greater than zero"))
    }

    pub fn as_f64(&self) -> f64 {
        self.into_inner() as f64
    }
}

/// Display label of a weighting segment
#[nutype(
    sanitize(trim),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct SegmentLabel(String);
