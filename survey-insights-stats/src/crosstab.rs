use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use survey_insights_core::{ensure_same_length, AnalyticsError, Result};

use crate::hypothesis::{chi_square_components, HypothesisTestEngine, StatisticalTestResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabResult {
    pub row_categories: Vec<String>,
    pub column_categories: Vec<String>,
    pub observed: Vec<Vec<u64>>,
    pub expected: Vec<Vec<f64>>,
    pub total: u64,
    pub chi_square: StatisticalTestResult,
    pub cramers_v: f64,
}

/// Contingency tables for two respondent-aligned categorical variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossTabulator {
    tests: HypothesisTestEngine,
}

impl CrossTabulator {
    pub fn new(tests: HypothesisTestEngine) -> Self {
        Self { tests }
    }

    pub fn cross_tabulate<S: AsRef<str>>(&self, rows: &[S], columns: &[S]) -> Result<CrossTabResult> {
        ensure_same_length(rows.len(), columns.len())?;
        if rows.is_empty() {
            return Err(AnalyticsError::EmptyInput("categorical variables".to_string()));
        }

        let row_categories = sorted_categories(rows);
        let column_categories = sorted_categories(columns);

        let mut observed = vec![vec![0u64; column_categories.len()]; row_categories.len()];
        for (row_value, column_value) in rows.iter().zip(columns) {
            // Both lookups succeed: categories were built from these same values.
            if let (Ok(r), Ok(c)) = (
                row_categories.binary_search_by(|probe| probe.as_str().cmp(row_value.as_ref())),
                column_categories.binary_search_by(|probe| probe.as_str().cmp(column_value.as_ref())),
            ) {
                observed[r][c] += 1;
            }
        }

        let components = chi_square_components(&observed)?;
        let chi_square = self.tests.chi_square_result(&components);
        let cramers_v = cramers_v(
            components.statistic,
            components.total,
            row_categories.len(),
            column_categories.len(),
        );

        tracing::debug!(
            rows = row_categories.len(),
            columns = column_categories.len(),
            chi_square = components.statistic,
            "cross tabulation computed"
        );

        Ok(CrossTabResult {
            row_categories,
            column_categories,
            observed,
            expected: components.expected,
            total: components.total,
            chi_square,
            cramers_v,
        })
    }
}

/// `sqrt(χ² / (n · (min(R, C) - 1)))`, zero for single-row or single-column tables.
pub fn cramers_v(chi_square: f64, total: u64, rows: usize, columns: usize) -> f64 {
    let k = rows.min(columns).saturating_sub(1);
    if k == 0 || total == 0 {
        return 0.0;
    }
    (chi_square / (total as f64 * k as f64)).sqrt().clamp(0.0, 1.0)
}

fn sorted_categories<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
