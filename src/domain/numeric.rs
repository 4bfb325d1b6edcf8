//! Numeric helpers shared by every calculator

use crate::domain::constants::erf_approximation::{A1, A2, A3, A4, A5, P};

/// Restrict `value` to `[low, high]`.
///
/// Callers guarantee `low <= high`. NaN collapses to `low`, so a
/// non-finite input never escapes into a reported rate.
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    if value.is_nan() {
        return low;
    }
    value.clamp(low, high)
}

/// Error function, Abramowitz & Stegun 7.1.26 (max error about 1.5e-7)
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function Φ(z)
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}
