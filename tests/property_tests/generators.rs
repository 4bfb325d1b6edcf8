//! Input generators shared by the property tests

use proptest::collection::vec;
use proptest::prelude::*;
use research_toolbox::domain::{
    ConfidenceLevel, DropoffInput, GroupInput, InputMode, QuestionMix, SampleSizeInput, Segment,
    SignificanceInput, Tail, WeightingInput,
};

/// Any confidence level, including the ones that fall back to 95%
pub fn confidence_level() -> impl Strategy<Value = ConfidenceLevel> {
    prop_oneof![Just(90u32), Just(95u32), Just(99u32), any::<u32>()].prop_map(ConfidenceLevel::from)
}

pub fn tail() -> impl Strategy<Value = Tail> {
    prop_oneof![Just(Tail::Two), Just(Tail::Left), Just(Tail::Right)]
}

/// Sample size inputs, deliberately wandering outside the clamped ranges
pub fn sample_size_input() -> impl Strategy<Value = SampleSizeInput> {
    (0u64..10_000_000, -0.5f64..1.5, -0.1f64..0.8, confidence_level()).prop_map(
        |(population, expected_proportion, margin_of_error, confidence_level)| SampleSizeInput {
            population,
            expected_proportion,
            margin_of_error,
            confidence_level,
        },
    )
}

pub fn segment() -> impl Strategy<Value = Segment> {
    (
        "[A-Za-z0-9 +]{0,12}",
        prop_oneof![Just(0.0), 0.0f64..100.0],
        prop_oneof![Just(0.0), 0.0f64..100.0],
        proptest::option::of(-20.0f64..120.0),
    )
        .prop_map(|(label, sample, target, outcome)| {
            let segment = Segment::new(&label, sample, target);
            match outcome {
                Some(y) => segment.with_outcome(y),
                None => segment,
            }
        })
}

pub fn weighting_input() -> impl Strategy<Value = WeightingInput> {
    (1i64..100_000, vec(segment(), 1..8)).prop_map(|(total_interviews, segments)| {
        WeightingInput {
            total_interviews,
            segments,
        }
    })
}

/// Counts-mode groups with 0 ≤ x ≤ n
pub fn count_group() -> impl Strategy<Value = GroupInput> {
    (1i64..5_000).prop_flat_map(|total| (0..=total).prop_map(move |x| GroupInput::counts(x, total)))
}

pub fn counts_significance_input() -> impl Strategy<Value = SignificanceInput> {
    (count_group(), count_group(), confidence_level(), tail()).prop_map(
        |(group_a, group_b, confidence_level, tail)| SignificanceInput {
            mode: InputMode::Counts,
            group_a,
            group_b,
            confidence_level,
            tail,
        },
    )
}

pub fn percents_significance_input() -> impl Strategy<Value = SignificanceInput> {
    (
        -10.0f64..110.0,
        1i64..5_000,
        -10.0f64..110.0,
        1i64..5_000,
        confidence_level(),
        tail(),
    )
        .prop_map(|(pct_a, n_a, pct_b, n_b, confidence_level, tail)| SignificanceInput {
            mode: InputMode::Percents,
            group_a: GroupInput::percent(pct_a, n_a),
            group_b: GroupInput::percent(pct_b, n_b),
            confidence_level,
            tail,
        })
}

pub fn question_mix() -> impl Strategy<Value = QuestionMix> {
    (0u32..200, 0u32..200, 0u32..200, 0u32..100).prop_map(
        |(single_choice, multi_choice, grid_rows, open_ends)| QuestionMix {
            single_choice,
            multi_choice,
            grid_rows,
            open_ends,
        },
    )
}

pub fn dropoff_input() -> impl Strategy<Value = DropoffInput> {
    (question_mix(), -20.0f64..120.0, -5.0f64..100.0, -0.5f64..1.5).prop_map(
        |(questions, mobile_share_percent, incentive, base_start_rate)| DropoffInput {
            questions,
            mobile_share_percent,
            incentive,
            base_start_rate,
        },
    )
}
