use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use survey_insights_core::{ensure_finite, ensure_same_length, AnalyticsError, EngineConfig, Result};

use crate::pvalue::{PValuePolicy, Significance};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalTestResult {
    pub test_name: String,
    pub test_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub significance: Significance,
    pub description: String,
}

/// Intermediate chi-square quantities shared with the cross-tabulator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareComponents {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub total: u64,
    pub expected: Vec<Vec<f64>>,
}

/// t-tests and chi-square test of independence.
#[derive(Debug, Clone, Copy, Default)]
pub struct HypothesisTestEngine {
    policy: PValuePolicy,
}

impl HypothesisTestEngine {
    pub fn new(policy: PValuePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(PValuePolicy::from_config(config))
    }

    pub fn policy(&self) -> &PValuePolicy {
        &self.policy
    }

    /// One-sample t-test against a known population mean.
    pub fn one_sample_t_test(
        &self,
        sample: &[f64],
        population_mean: Option<f64>,
    ) -> Result<StatisticalTestResult> {
        let population_mean = population_mean
            .ok_or_else(|| AnalyticsError::MissingParameter("population mean".to_string()))?;
        if !population_mean.is_finite() {
            return Err(AnalyticsError::InvalidInput(
                "population mean must be finite".to_string(),
            ));
        }
        require_points(sample, 2)?;

        let n = sample.len() as f64;
        let standard_error = sample.std_dev() / n.sqrt();
        let t = t_ratio(sample.mean() - population_mean, standard_error);

        Ok(self.t_result("One-sample t-test", t, n - 1.0))
    }

    /// Welch's unequal-variance two-sample t-test.
    pub fn two_sample_t_test(&self, first: &[f64], second: &[f64]) -> Result<StatisticalTestResult> {
        require_points(first, 2)?;
        require_points(second, 2)?;

        let (n1, n2) = (first.len() as f64, second.len() as f64);
        let share1 = first.variance() / n1;
        let share2 = second.variance() / n2;

        let t = t_ratio(first.mean() - second.mean(), (share1 + share2).sqrt());

        let welch_denominator = share1.powi(2) / (n1 - 1.0) + share2.powi(2) / (n2 - 1.0);
        let df = if welch_denominator > 0.0 {
            (share1 + share2).powi(2) / welch_denominator
        } else {
            n1 + n2 - 2.0
        };

        Ok(self.t_result("Welch's t-test", t, df))
    }

    /// Paired t-test on per-subject differences.
    pub fn paired_t_test(&self, before: &[f64], after: &[f64]) -> Result<StatisticalTestResult> {
        ensure_same_length(before.len(), after.len())?;
        require_points(before, 2)?;
        require_points(after, 2)?;

        let differences: Vec<f64> = before.iter().zip(after).map(|(b, a)| a - b).collect();
        let differences = differences.as_slice();
        let n = differences.len() as f64;
        let standard_error = differences.std_dev() / n.sqrt();
        let t = t_ratio(differences.mean(), standard_error);

        Ok(self.t_result("Paired t-test", t, n - 1.0))
    }

    /// Chi-square test of independence over an R×C table of observed counts.
    pub fn chi_square_test(&self, observed: &[Vec<u64>]) -> Result<StatisticalTestResult> {
        let components = chi_square_components(observed)?;
        Ok(self.chi_square_result(&components))
    }

    pub(crate) fn chi_square_result(&self, components: &ChiSquareComponents) -> StatisticalTestResult {
        let df = components.degrees_of_freedom as f64;
        let p_value = self.policy.chi_square_p_value(components.statistic, df);
        let significance = self.policy.significance(p_value);

        StatisticalTestResult {
            test_name: "Chi-square test of independence".to_string(),
            test_statistic: components.statistic,
            degrees_of_freedom: df,
            p_value,
            significance,
            description: format!(
                "χ²({}) = {:.3}, p = {}; the variables {} associated at α = {}",
                components.degrees_of_freedom,
                components.statistic,
                p_value,
                if significance.is_significant() { "are" } else { "are not" },
                self.policy.significance_level(),
            ),
        }
    }

    fn t_result(&self, test_name: &str, t: f64, df: f64) -> StatisticalTestResult {
        let p_value = self.policy.t_p_value(t, df);
        let significance = self.policy.significance(p_value);

        StatisticalTestResult {
            test_name: test_name.to_string(),
            test_statistic: t,
            degrees_of_freedom: df,
            p_value,
            significance,
            description: format!(
                "t({:.2}) = {:.3}, p = {}; the difference {} significant at α = {}",
                df,
                t,
                p_value,
                if significance.is_significant() { "is" } else { "is not" },
                self.policy.significance_level(),
            ),
        }
    }
}

/// Expected counts from margins, `Σ (O-E)²/E` and `(R-1)(C-1)` degrees of freedom.
pub fn chi_square_components(observed: &[Vec<u64>]) -> Result<ChiSquareComponents> {
    let columns = observed.first().map(Vec::len).unwrap_or(0);
    if observed.is_empty() || columns == 0 {
        return Err(AnalyticsError::EmptyInput("contingency table".to_string()));
    }
    for row in observed {
        ensure_same_length(columns, row.len())?;
    }

    let row_totals: Vec<u64> = observed.iter().map(|row| row.iter().sum()).collect();
    let column_totals: Vec<u64> = (0..columns)
        .map(|c| observed.iter().map(|row| row[c]).sum())
        .collect();
    let total: u64 = row_totals.iter().sum();
    if total == 0 {
        return Err(AnalyticsError::EmptyInput(
            "contingency table has no observations".to_string(),
        ));
    }

    let mut statistic = 0.0;
    let mut expected = Vec::with_capacity(observed.len());
    for (r, row) in observed.iter().enumerate() {
        let mut expected_row = Vec::with_capacity(columns);
        for (c, &count) in row.iter().enumerate() {
            let e = row_totals[r] as f64 * column_totals[c] as f64 / total as f64;
            if e > 0.0 {
                statistic += (count as f64 - e).powi(2) / e;
            }
            expected_row.push(e);
        }
        expected.push(expected_row);
    }

    Ok(ChiSquareComponents {
        statistic,
        degrees_of_freedom: (observed.len() - 1) * (columns - 1),
        total,
        expected,
    })
}

fn require_points(sample: &[f64], required: usize) -> Result<()> {
    ensure_finite(sample, "test sample")?;
    if sample.len() < required {
        return Err(AnalyticsError::InsufficientData {
            required,
            actual: sample.len(),
        });
    }
    Ok(())
}

fn t_ratio(difference: f64, standard_error: f64) -> f64 {
    if standard_error > 0.0 {
        difference / standard_error
    } else if difference == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(difference)
    }
}
