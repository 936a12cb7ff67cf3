use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use survey_insights_core::{ensure_finite, AnalyticsError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; absent when no value repeats.
    pub mode: Option<f64>,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal distribution = 0).
    pub kurtosis: f64,
}

pub struct DescriptiveStatsCalculator;

impl DescriptiveStatsCalculator {
    /// Fails when the sample is empty or non-finite, or when its moments overflow `f64`.
    pub fn calculate(values: &[f64]) -> Result<DescriptiveStats> {
        ensure_finite(values, "numeric sample")?;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        // Running mean can drift by an ulp; the true mean is always within the sample bounds.
        let mean = values.mean().clamp(min, max);
        let variance = values.population_variance();
        let variance = if variance.is_nan() { f64::INFINITY } else { variance.max(0.0) };
        let std_dev = variance.sqrt();

        let q1 = Self::quantile(&sorted, 0.25);
        let q3 = Self::quantile(&sorted, 0.75);

        let (skewness, kurtosis) = if std_dev == 0.0 {
            (0.0, 0.0)
        } else {
            let n = values.len() as f64;
            let m3 = values.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
            let m4 = values.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;
            (m3 / std_dev.powi(3), m4 / std_dev.powi(4) - 3.0)
        };

        let sum: f64 = values.iter().sum();
        if ![sum, mean, variance, skewness, kurtosis].iter().all(|v| v.is_finite()) {
            return Err(AnalyticsError::InvalidInput(
                "numeric sample magnitude overflows its moments".to_string(),
            ));
        }

        Ok(DescriptiveStats {
            count: values.len(),
            sum,
            mean,
            median: Self::quantile(&sorted, 0.5),
            mode: Self::mode(&sorted),
            std_dev,
            variance,
            min,
            max,
            range: max - min,
            q1,
            q3,
            iqr: q3 - q1,
            skewness,
            kurtosis,
        })
    }

    /// Linear-interpolated quantile of an ascending slice, `p` in [0, 1].
    pub fn quantile(sorted_values: &[f64], p: f64) -> f64 {
        if sorted_values.is_empty() {
            return 0.0;
        }
        let position = p.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        let (low, high) = (sorted_values[lower], sorted_values[upper]);
        if lower == upper {
            return low;
        }
        (low + (high - low) * (position - lower as f64)).clamp(low, high)
    }

    /// Smallest of the most frequent values, if any value occurs more than once.
    fn mode(sorted_values: &[f64]) -> Option<f64> {
        let mut best: Option<(f64, usize)> = None;
        let mut i = 0;
        while i < sorted_values.len() {
            let mut j = i;
            while j < sorted_values.len() && sorted_values[j] == sorted_values[i] {
                j += 1;
            }
            let run = j - i;
            if run > 1 && best.map_or(true, |(_, count)| run > count) {
                best = Some((sorted_values[i], run));
            }
            i = j;
        }
        best.map(|(value, _)| value)
    }
}
