//! Confidence levels and their critical values

use crate::domain::constants::{critical_values, PERCENT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported two-sided confidence levels
///
/// Deserialized from any JSON number. Anything other than exactly 90, 95 or
/// 99 (including fractions and negatives) falls back to 95 rather than
/// failing. Serialized as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u32")]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    /// Critical value Z of the standard normal distribution
    pub fn critical_value(&self) -> f64 {
        match self {
            Self::Ninety => critical_values::Z_90,
            Self::NinetyFive => critical_values::Z_95,
            Self::NinetyNine => critical_values::Z_99,
        }
    }

    pub fn as_percent(&self) -> u32 {
        match self {
            Self::Ninety => 90,
            Self::NinetyFive => 95,
            Self::NinetyNine => 99,
        }
    }

    /// Significance threshold α = 1 − level/100
    pub fn alpha(&self) -> f64 {
        1.0 - f64::from(self.as_percent()) / PERCENT
    }
}

impl From<u32> for ConfidenceLevel {
    fn from(percent: u32) -> Self {
        match percent {
            90 => Self::Ninety,
            99 => Self::NinetyNine,
            _ => Self::NinetyFive,
        }
    }
}

impl From<f64> for ConfidenceLevel {
    fn from(percent: f64) -> Self {
        if percent == 90.0 {
            Self::Ninety
        } else if percent == 99.0 {
            Self::NinetyNine
        } else {
            Self::NinetyFive
        }
    }
}

impl From<ConfidenceLevel> for u32 {
    fn from(level: ConfidenceLevel) -> Self {
        level.as_percent()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// Critical value for a raw confidence percentage; unknown levels use 95%
pub fn critical_value(percent: u32) -> f64 {
    ConfidenceLevel::from(percent).critical_value()
}
