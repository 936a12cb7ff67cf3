use proptest::prelude::*;
use survey_insights_stats::*;

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..60)
}

proptest! {
    #[test]
    fn prop_mean_and_median_within_bounds(values in sample()) {
        let stats = DescriptiveStatsCalculator::calculate(&values).unwrap();
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.q1 <= stats.q3);
        prop_assert!(stats.std_dev >= 0.0);
    }

    #[test]
    fn prop_constant_sample_has_zero_spread(value in -1.0e6..1.0e6f64, len in 1usize..40) {
        let stats = DescriptiveStatsCalculator::calculate(&vec![value; len]).unwrap();
        prop_assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn prop_correlation_symmetric_and_bounded(
        pairs in prop::collection::vec((-1.0e3..1.0e3f64, -1.0e3..1.0e3f64), 2..40)
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let engine = CorrelationEngine::default();
        let xy = engine.correlate(&x, &y).unwrap();
        let yx = engine.correlate(&y, &x).unwrap();

        prop_assert_eq!(xy.coefficient.to_bits(), yx.coefficient.to_bits());
        prop_assert!((-1.0..=1.0).contains(&xy.coefficient));
    }

    #[test]
    fn prop_descriptive_stats_deterministic(values in sample()) {
        let first = DescriptiveStatsCalculator::calculate(&values).unwrap();
        let second = DescriptiveStatsCalculator::calculate(&values).unwrap();
        prop_assert_eq!(first, second);
    }
}
