//! Two-proportion z-test
//!
//! The hypothesis test uses the pooled standard error, which is the right
//! variance under H₀: p₁ = p₂. The confidence interval for p₁ − p₂ uses the
//! unpooled (Wald) standard error, which estimates the variance of the
//! observed difference.

use crate::domain::confidence::ConfidenceLevel;
use crate::domain::numeric::{clamp, normal_cdf};
use crate::domain::types::{InterviewCount, Percentage, Proportion};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// How group successes are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Successes are whole counts x out of n
    #[default]
    Counts,
    /// Successes are a percentage of n
    Percents,
}

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tail {
    /// H₁: p₁ ≠ p₂
    #[default]
    Two,
    /// H₁: p₁ < p₂
    Left,
    /// H₁: p₁ > p₂
    Right,
}

impl Tail {
    /// p-value of a standard normal test statistic under this alternative
    pub fn p_value(&self, z: f64) -> f64 {
        let p = match self {
            Self::Two => 2.0 * (1.0 - normal_cdf(z.abs())),
            Self::Right => 1.0 - normal_cdf(z),
            Self::Left => normal_cdf(z),
        };
        clamp(p, 0.0, 1.0)
    }
}

/// Observed results for one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupInput {
    /// Success count in counts mode, success percentage in percents mode
    pub successes: f64,
    /// Signed so that a negative total is reported as invalid input
    pub total: i64,
}

impl GroupInput {
    pub fn counts(successes: i64, total: i64) -> Self {
        Self {
            successes: successes as f64,
            total,
        }
    }

    pub fn percent(percent: f64, total: i64) -> Self {
        Self {
            successes: percent,
            total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceInput {
    #[serde(default)]
    pub mode: InputMode,
    pub group_a: GroupInput,
    pub group_b: GroupInput,
    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
    #[serde(default)]
    pub tail: Tail,
}

/// Sign of the observed difference p₁ − p₂
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
    Same,
}

impl Direction {
    pub fn from_difference(diff: f64) -> Self {
        if diff > 0.0 {
            Self::Higher
        } else if diff < 0.0 {
            Self::Lower
        } else {
            Self::Same
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Higher => write!(f, "higher than"),
            Self::Lower => write!(f, "lower than"),
            Self::Same => write!(f, "the same as"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    pub p1: Proportion,
    pub p2: Proportion,
    pub z: f64,
    pub p_value: f64,
    /// p₁ − p₂
    pub difference: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub alpha: f64,
    pub significant: bool,
    pub direction: Direction,
}

impl SignificanceResult {
    /// Plain-language verdict for reporting
    pub fn interpretation(&self, confidence_level: ConfidenceLevel) -> String {
        if self.significant {
            format!(
                "At {} confidence (α={:.3}), A is {} B by {:.2} pp. The difference is statistically significant (p={:.2e}).",
                confidence_level,
                self.alpha,
                self.direction,
                self.difference * 100.0,
                self.p_value
            )
        } else {
            format!(
                "At {} confidence (α={:.3}), we do not have enough evidence that A and B differ (p={:.2e}).",
                confidence_level, self.alpha, self.p_value
            )
        }
    }
}

/// A group resolved to its proportion and (possibly fractional) success count
struct Observed {
    proportion: f64,
    successes: f64,
    total: f64,
}

impl Observed {
    fn resolve(group: &GroupInput, mode: InputMode, field: &str) -> Result<Self> {
        let total = InterviewCount::parse(group.total, &format!("{field}.total"))?.as_f64();

        match mode {
            InputMode::Counts => {
                let x = group.successes;
                if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
                    return Err(Error::invalid_input(
                        format!("{field}.successes"),
                        "must be a whole, non-negative count",
                    ));
                }
                if x > total {
                    return Err(Error::invalid_input(
                        format!("{field}.successes"),
                        "cannot exceed the group total",
                    ));
                }
                Ok(Self {
                    proportion: x / total,
                    successes: x,
                    total,
                })
            }
            InputMode::Percents => {
                let proportion = Percentage::new(group.successes)
                    .as_proportion()
                    .into_inner();
                Ok(Self {
                    proportion,
                    successes: proportion * total,
                    total,
                })
            }
        }
    }
}

/// Test whether two observed proportions differ
///
/// # Errors
///
/// `InvalidInput` when a group total is zero, or in counts mode when a
/// success count is fractional, negative, or larger than its total.
pub fn compare_proportions(input: &SignificanceInput) -> Result<SignificanceResult> {
    let a = Observed::resolve(&input.group_a, input.mode, "group_a")?;
    let b = Observed::resolve(&input.group_b, input.mode, "group_b")?;

    let (p1, p2) = (a.proportion, b.proportion);
    let difference = p1 - p2;

    let pooled = (a.successes + b.successes) / (a.total + b.total);
    let se_pooled = (pooled * (1.0 - pooled) * (1.0 / a.total + 1.0 / b.total)).sqrt();
    let z = if se_pooled > 0.0 {
        difference / se_pooled
    } else {
        warn!(pooled, "Pooled standard error is zero; no evidence of a difference");
        0.0
    };
    let p_value = input.tail.p_value(z);

    let se_diff = (p1 * (1.0 - p1) / a.total + p2 * (1.0 - p2) / b.total).sqrt();
    let margin = input.confidence_level.critical_value() * se_diff;

    let alpha = input.confidence_level.alpha();
    let significant = p_value < alpha;

    debug!(z, p_value, difference, significant, "Tested two proportions");

    Ok(SignificanceResult {
        p1: Proportion::new(p1),
        p2: Proportion::new(p2),
        z,
        p_value,
        difference,
        ci_lower: difference - margin,
        ci_upper: difference + margin,
        alpha,
        significant,
        direction: Direction::from_difference(difference),
    })
}
