use approx::assert_relative_eq;
use rstest::rstest;
use survey_insights_core::AnalyticsError;
use survey_insights_stats::DescriptiveStatsCalculator;

// ===== Basic Statistics =====

#[test]
fn test_descriptive_stats_one_to_five() {
    let stats = DescriptiveStatsCalculator::calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

    assert_eq!(stats.count, 5);
    assert_relative_eq!(stats.mean, 3.0, epsilon = 1e-12);
    assert_eq!(stats.median, 3.0);
    assert_relative_eq!(stats.std_dev, 2.0_f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(stats.variance, 2.0, epsilon = 1e-9);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 5.0);
    assert_eq!(stats.range, 4.0);
    assert_eq!(stats.q1, 2.0);
    assert_eq!(stats.q3, 4.0);
    assert_eq!(stats.iqr, 2.0);
    assert_eq!(stats.mode, None);
    assert_relative_eq!(stats.skewness, 0.0, epsilon = 1e-12);
}

#[test]
fn test_descriptive_stats_unsorted_input() {
    let stats = DescriptiveStatsCalculator::calculate(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
    assert_eq!(stats.median, 3.0);
    assert_eq!(stats.q1, 2.0);
}

#[test]
fn test_even_length_median_interpolates() {
    let stats = DescriptiveStatsCalculator::calculate(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(stats.median, 2.5);
    assert_relative_eq!(stats.q1, 1.75, epsilon = 1e-12);
    assert_relative_eq!(stats.q3, 3.25, epsilon = 1e-12);
}

#[test]
fn test_constant_sample() {
    let stats = DescriptiveStatsCalculator::calculate(&[4.2, 4.2, 4.2, 4.2]).unwrap();

    assert_eq!(stats.std_dev, 0.0);
    assert_eq!(stats.variance, 0.0);
    assert_eq!(stats.skewness, 0.0);
    assert_eq!(stats.kurtosis, 0.0);
    assert_eq!(stats.mode, Some(4.2));
    assert_eq!(stats.mean, 4.2);
}

#[test]
fn test_single_value() {
    let stats = DescriptiveStatsCalculator::calculate(&[7.0]).unwrap();
    assert_eq!(stats.mean, 7.0);
    assert_eq!(stats.median, 7.0);
    assert_eq!(stats.q1, 7.0);
    assert_eq!(stats.q3, 7.0);
    assert_eq!(stats.std_dev, 0.0);
}

#[test]
fn test_mode_most_frequent() {
    let stats = DescriptiveStatsCalculator::calculate(&[3.0, 1.0, 3.0, 2.0, 2.0, 3.0]).unwrap();
    assert_eq!(stats.mode, Some(3.0));
}

#[test]
fn test_right_skewed_sample() {
    let stats = DescriptiveStatsCalculator::calculate(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
    assert!(stats.skewness > 0.0);
    assert!(stats.kurtosis > -3.0);
}

// ===== Errors =====

#[test]
fn test_empty_sample_rejected() {
    let err = DescriptiveStatsCalculator::calculate(&[]).unwrap_err();
    assert!(matches!(err, AnalyticsError::EmptyInput(_)));
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn test_non_finite_rejected(#[case] bad: f64) {
    let err = DescriptiveStatsCalculator::calculate(&[1.0, bad, 3.0]).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidInput(_)));
}

#[rstest]
#[case(vec![1e300, -1e300, 1e300])]
#[case(vec![1e80, -1e80, 3e80])]
fn test_overflowing_moments_rejected(#[case] values: Vec<f64>) {
    assert!(matches!(
        DescriptiveStatsCalculator::calculate(&values),
        Err(AnalyticsError::InvalidInput(_))
    ));
}

#[test]
fn test_serialized_shape_is_camel_case() {
    let stats = DescriptiveStatsCalculator::calculate(&[1.0, 2.0, 2.0]).unwrap();
    let json = serde_json::to_value(&stats).unwrap();

    assert!(json.get("stdDev").is_some());
    assert!(json.get("iqr").is_some());
    assert_eq!(json["mode"], 2.0);
}
