//! Survey length drop-off heuristic
//!
//! Not a fitted statistical model. Duration comes from fixed per-item medians,
//! completion among starters decays exponentially once the survey runs past a
//! threshold, and two multipliers adjust for mobile share and incentive.
//! Every constant lives in [`DropoffParameters`].

use crate::domain::constants::{dropoff, SECONDS_PER_MINUTE};
use crate::domain::numeric::clamp;
use crate::domain::types::{Percentage, Proportion};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunable constants of the drop-off heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropoffParameters {
    pub seconds_per_single_choice: f64,
    pub seconds_per_multi_choice: f64,
    pub seconds_per_grid_row: f64,
    pub seconds_per_open_end: f64,
    pub baseline_completion: f64,
    pub decay_start_minutes: f64,
    pub decay_rate_per_minute: f64,
    /// Relative completion loss for a 100% mobile sample
    pub mobile_penalty: f64,
    pub incentive_divisor: f64,
    pub incentive_boost_cap: f64,
    pub min_completion: f64,
    pub max_completion: f64,
    pub min_invite_to_complete: f64,
    pub max_invite_to_complete: f64,
    pub min_start_rate: f64,
    pub max_start_rate: f64,
}

impl Default for DropoffParameters {
    fn default() -> Self {
        Self {
            seconds_per_single_choice: dropoff::SECONDS_PER_SINGLE_CHOICE,
            seconds_per_multi_choice: dropoff::SECONDS_PER_MULTI_CHOICE,
            seconds_per_grid_row: dropoff::SECONDS_PER_GRID_ROW,
            seconds_per_open_end: dropoff::SECONDS_PER_OPEN_END,
            baseline_completion: dropoff::BASELINE_COMPLETION,
            decay_start_minutes: dropoff::DECAY_START_MINUTES,
            decay_rate_per_minute: dropoff::DECAY_RATE_PER_MINUTE,
            mobile_penalty: dropoff::MOBILE_PENALTY,
            incentive_divisor: dropoff::INCENTIVE_DIVISOR,
            incentive_boost_cap: dropoff::INCENTIVE_BOOST_CAP,
            min_completion: dropoff::MIN_COMPLETION,
            max_completion: dropoff::MAX_COMPLETION,
            min_invite_to_complete: dropoff::MIN_INVITE_TO_COMPLETE,
            max_invite_to_complete: dropoff::MAX_INVITE_TO_COMPLETE,
            min_start_rate: dropoff::MIN_START_RATE,
            max_start_rate: dropoff::MAX_START_RATE,
        }
    }
}

/// Number of items of each question type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionMix {
    #[serde(default)]
    pub single_choice: u32,
    #[serde(default)]
    pub multi_choice: u32,
    #[serde(default)]
    pub grid_rows: u32,
    #[serde(default)]
    pub open_ends: u32,
}

impl QuestionMix {
    pub fn total(&self) -> u64 {
        u64::from(self.single_choice)
            + u64::from(self.multi_choice)
            + u64::from(self.grid_rows)
            + u64::from(self.open_ends)
    }

    /// Median completion time in seconds
    pub fn duration_seconds(&self, params: &DropoffParameters) -> f64 {
        f64::from(self.single_choice) * params.seconds_per_single_choice
            + f64::from(self.multi_choice) * params.seconds_per_multi_choice
            + f64::from(self.grid_rows) * params.seconds_per_grid_row
            + f64::from(self.open_ends) * params.seconds_per_open_end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropoffInput {
    pub questions: QuestionMix,
    /// Share of respondents on mobile devices, 0–100
    #[serde(default)]
    pub mobile_share_percent: f64,
    /// Incentive per respondent in any currency unit
    #[serde(default)]
    pub incentive: f64,
    /// Invite → start rate as a fraction
    pub base_start_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropoffResult {
    pub question_count: u64,
    pub duration_seconds: f64,
    pub median_minutes: f64,
    pub completion_given_start: Proportion,
    pub invite_to_complete: Proportion,
}

impl DropoffParameters {
    /// Completion among starters before device and incentive adjustments
    pub fn completion_for_duration(&self, minutes: f64) -> f64 {
        if minutes <= self.decay_start_minutes {
            self.baseline_completion
        } else {
            self.baseline_completion
                * (-self.decay_rate_per_minute * (minutes - self.decay_start_minutes)).exp()
        }
    }

    pub fn mobile_multiplier(&self, mobile_share: Percentage) -> f64 {
        1.0 - mobile_share.as_proportion().into_inner() * self.mobile_penalty
    }

    pub fn incentive_multiplier(&self, incentive: f64) -> f64 {
        let incentive = if incentive.is_finite() {
            incentive.max(0.0)
        } else {
            0.0
        };
        1.0 + (incentive / self.incentive_divisor).min(self.incentive_boost_cap)
    }
}

/// Predict completion rates for a survey of the given shape
pub fn predict_dropoff(input: &DropoffInput, params: &DropoffParameters) -> DropoffResult {
    let duration_seconds = input.questions.duration_seconds(params);
    let median_minutes = duration_seconds / SECONDS_PER_MINUTE;

    let adjusted = params.completion_for_duration(median_minutes)
        * params.mobile_multiplier(Percentage::new(input.mobile_share_percent))
        * params.incentive_multiplier(input.incentive);
    let completion_given_start = clamp(adjusted, params.min_completion, params.max_completion);

    let start_rate = clamp(
        input.base_start_rate,
        params.min_start_rate,
        params.max_start_rate,
    );
    let invite_to_complete = clamp(
        start_rate * completion_given_start,
        params.min_invite_to_complete,
        params.max_invite_to_complete,
    );

    debug!(
        median_minutes,
        completion_given_start, invite_to_complete, "Predicted survey drop-off"
    );

    DropoffResult {
        question_count: input.questions.total(),
        duration_seconds,
        median_minutes,
        completion_given_start: Proportion::new(completion_given_start),
        invite_to_complete: Proportion::new(invite_to_complete),
    }
}
