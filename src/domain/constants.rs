//! Fixed numeric constants used by the calculators

/// Critical values of the standard normal distribution
pub mod critical_values {
    /// Two-sided critical value at 90% confidence
    pub const Z_90: f64 = 1.644854;

    /// Two-sided critical value at 95% confidence
    pub const Z_95: f64 = 1.959964;

    /// Two-sided critical value at 99% confidence
    pub const Z_99: f64 = 2.575829;
}

/// Abramowitz & Stegun 7.1.26 rational approximation of erf
pub mod erf_approximation {
    pub const A1: f64 = 0.254829592;
    pub const A2: f64 = -0.284496736;
    pub const A3: f64 = 1.421413741;
    pub const A4: f64 = -1.453152027;
    pub const A5: f64 = 1.061405429;
    pub const P: f64 = 0.3275911;
}

/// Input bounds for the sample size estimator
pub mod sample_size {
    /// Smallest expected proportion accepted before clamping
    pub const MIN_PROPORTION: f64 = 0.0001;

    /// Largest expected proportion accepted before clamping
    pub const MAX_PROPORTION: f64 = 0.9999;

    /// Smallest margin of error (as a fraction)
    pub const MIN_MARGIN_OF_ERROR: f64 = 0.0005;

    /// Largest margin of error (as a fraction)
    pub const MAX_MARGIN_OF_ERROR: f64 = 0.5;
}

/// Heuristic drop-off model defaults
///
/// These are not calibrated against ground-truth data. They are kept exactly
/// as the model has always used them and can be overridden through
/// `DropoffParameters`.
pub mod dropoff {
    /// Median seconds to answer a single-choice question
    pub const SECONDS_PER_SINGLE_CHOICE: f64 = 6.0;

    /// Median seconds to answer a multi-choice question
    pub const SECONDS_PER_MULTI_CHOICE: f64 = 9.0;

    /// Median seconds to answer one grid row
    pub const SECONDS_PER_GRID_ROW: f64 = 14.0;

    /// Median seconds to answer an open-ended question
    pub const SECONDS_PER_OPEN_END: f64 = 28.0;

    /// Completion rate among starters for short surveys
    pub const BASELINE_COMPLETION: f64 = 0.90;

    /// Duration in minutes after which completion starts to decay
    pub const DECAY_START_MINUTES: f64 = 3.0;

    /// Exponential decay rate per minute beyond the decay start
    pub const DECAY_RATE_PER_MINUTE: f64 = 0.18;

    /// Completion penalty for a fully mobile sample
    pub const MOBILE_PENALTY: f64 = 0.15;

    /// Incentive amount that yields a 100% boost before capping
    pub const INCENTIVE_DIVISOR: f64 = 10.0;

    /// Maximum relative boost from incentives
    pub const INCENTIVE_BOOST_CAP: f64 = 0.25;

    /// Floor for completion given start
    pub const MIN_COMPLETION: f64 = 0.05;

    /// Ceiling for completion given start
    pub const MAX_COMPLETION: f64 = 0.98;

    /// Floor for the overall invite to complete rate
    pub const MIN_INVITE_TO_COMPLETE: f64 = 0.01;

    /// Ceiling for the overall invite to complete rate
    pub const MAX_INVITE_TO_COMPLETE: f64 = 0.95;

    /// Floor for the invite to start rate
    pub const MIN_START_RATE: f64 = 0.01;

    /// Ceiling for the invite to start rate
    pub const MAX_START_RATE: f64 = 0.9;
}

pub const SECONDS_PER_MINUTE: f64 = 60.0;

pub const PERCENT: f64 = 100.0;
