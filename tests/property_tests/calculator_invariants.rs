use crate::generators;
use proptest::prelude::*;
use research_toolbox::domain::{
    analyze_weighting, compare_proportions, estimate_sample_size, normal_cdf, predict_dropoff,
    DropoffInput, DropoffParameters, SignificanceInput, Tail,
};

const EPSILON: f64 = 1e-9;

proptest! {
    #[test]
    fn normal_cdf_is_symmetric(z in -8.0f64..8.0) {
        prop_assert!((normal_cdf(z) + normal_cdf(-z) - 1.0).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&normal_cdf(z)));
    }

    #[test]
    fn normal_cdf_is_non_decreasing(a in -6.0f64..6.0, b in -6.0f64..6.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normal_cdf(lo) <= normal_cdf(hi));
    }

    #[test]
    fn finite_population_correction_never_increases_n(input in generators::sample_size_input()) {
        let result = estimate_sample_size(&input);

        prop_assert!(result.required_n.is_finite());
        prop_assert!(result.required_n > 0.0);
        prop_assert_eq!(result.finite_population_correction_applied, input.population > 0);
        prop_assert!(result.required_n <= result.unadjusted_n + EPSILON);
        prop_assert!(result.recommended_n() as f64 >= result.required_n);
    }

    #[test]
    fn weighting_never_increases_effective_sample(input in generators::weighting_input()) {
        let result = analyze_weighting(&input).unwrap();

        prop_assert!(result.design_effect >= 1.0);
        prop_assert!(result.effective_sample_size <= input.total_interviews as f64);
        prop_assert!(result.min_weight <= result.max_weight);
        prop_assert!(result.min_weight >= 0.0);
    }

    #[test]
    fn normalized_shares_sum_to_one_or_zero(input in generators::weighting_input()) {
        let result = analyze_weighting(&input).unwrap();

        for sum in [
            result.segments.iter().map(|s| s.sample_proportion.into_inner()).sum::<f64>(),
            result.segments.iter().map(|s| s.target_proportion.into_inner()).sum::<f64>(),
        ] {
            prop_assert!((sum - 1.0).abs() < EPSILON || sum == 0.0, "shares summed to {}", sum);
        }
    }

    #[test]
    fn weighted_outcomes_are_proportions(input in generators::weighting_input()) {
        let result = analyze_weighting(&input).unwrap();

        let has_outcomes = input.segments.iter().any(|s| s.outcome_percent.is_some());
        prop_assert_eq!(result.outcome.is_some(), has_outcomes);
        if let Some(outcome) = result.outcome {
            prop_assert!((0.0..=1.0).contains(&outcome.unweighted.into_inner()));
            prop_assert!((0.0..=1.0).contains(&outcome.weighted.into_inner()));
        }
    }

    #[test]
    fn one_sided_p_values_are_complementary(input in generators::counts_significance_input()) {
        let left = compare_proportions(&SignificanceInput { tail: Tail::Left, ..input }).unwrap();
        let right = compare_proportions(&SignificanceInput { tail: Tail::Right, ..input }).unwrap();
        let two = compare_proportions(&SignificanceInput { tail: Tail::Two, ..input }).unwrap();

        prop_assert!((left.p_value + right.p_value - 1.0).abs() < EPSILON);
        prop_assert!((two.p_value - 2.0 * left.p_value.min(right.p_value)).abs() < EPSILON);
    }

    #[test]
    fn significance_results_stay_in_range(input in generators::counts_significance_input()) {
        let result = compare_proportions(&input).unwrap();

        prop_assert!(result.z.is_finite());
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert!((0.0..=1.0).contains(&result.p1.into_inner()));
        prop_assert!((0.0..=1.0).contains(&result.p2.into_inner()));
        prop_assert!(result.ci_lower <= result.difference);
        prop_assert!(result.difference <= result.ci_upper);
        prop_assert_eq!(result.significant, result.p_value < result.alpha);
    }

    #[test]
    fn percent_mode_results_stay_in_range(input in generators::percents_significance_input()) {
        let result = compare_proportions(&input).unwrap();

        prop_assert!(result.z.is_finite());
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert!((0.0..=1.0).contains(&result.p1.into_inner()));
        prop_assert!((0.0..=1.0).contains(&result.p2.into_inner()));
    }

    #[test]
    fn two_sided_p_value_falls_as_z_grows(a in 0.0f64..6.0, b in 0.0f64..6.0) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Tail::Two.p_value(small) >= Tail::Two.p_value(large));
        prop_assert!(Tail::Two.p_value(-small) >= Tail::Two.p_value(-large));
    }

    #[test]
    fn dropoff_rates_stay_within_bounds(input in generators::dropoff_input()) {
        let result = predict_dropoff(&input, &DropoffParameters::default());

        let completion = result.completion_given_start.into_inner();
        let overall = result.invite_to_complete.into_inner();
        prop_assert!((0.05..=0.98).contains(&completion));
        prop_assert!((0.01..=0.95).contains(&overall));
        prop_assert!(result.median_minutes >= 0.0);
    }

    #[test]
    fn mobile_share_never_helps(
        input in generators::dropoff_input(),
        a in 0.0f64..=100.0,
        b in 0.0f64..=100.0,
    ) {
        let params = DropoffParameters::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let at_low = predict_dropoff(&DropoffInput { mobile_share_percent: low, ..input }, &params);
        let at_high = predict_dropoff(&DropoffInput { mobile_share_percent: high, ..input }, &params);
        prop_assert!(at_low.completion_given_start >= at_high.completion_given_start);
    }

    #[test]
    fn incentive_never_hurts_and_caps(
        input in generators::dropoff_input(),
        a in 0.0f64..20.0,
        b in 0.0f64..20.0,
    ) {
        let params = DropoffParameters::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let at_low = predict_dropoff(&DropoffInput { incentive: low, ..input }, &params);
        let at_high = predict_dropoff(&DropoffInput { incentive: high, ..input }, &params);
        prop_assert!(at_low.completion_given_start <= at_high.completion_given_start);

        let capped = predict_dropoff(&DropoffInput { incentive: 2.5, ..input }, &params);
        let beyond = predict_dropoff(&DropoffInput { incentive: 2.5 + high, ..input }, &params);
        prop_assert_eq!(capped, beyond);
    }
}
