use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};
use survey_insights_core::{EngineConfig, PValueMethod};

/// |t| thresholds and the p-value reported when the statistic exceeds them.
pub const T_LADDER: [(f64, f64); 4] = [(3.5, 0.001), (2.5, 0.01), (1.96, 0.05), (1.5, 0.1)];

/// Chi-square thresholds and the p-value reported when the statistic exceeds them.
pub const CHI_SQUARE_LADDER: [(f64, f64); 4] = [(15.0, 0.001), (9.0, 0.01), (6.0, 0.05), (3.0, 0.1)];

/// P-value reported when no ladder threshold is exceeded.
pub const LADDER_FLOOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Significance {
    Significant,
    NotSignificant,
}

impl Significance {
    pub fn is_significant(self) -> bool {
        matches!(self, Self::Significant)
    }
}

/// Maps test statistics to p-values and significance verdicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PValuePolicy {
    method: PValueMethod,
    significance_level: f64,
}

impl PValuePolicy {
    pub fn new(method: PValueMethod, significance_level: f64) -> Self {
        Self {
            method,
            significance_level,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.p_value_method, config.significance_level)
    }

    pub fn method(&self) -> PValueMethod {
        self.method
    }

    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Two-tailed p-value for a t statistic.
    pub fn t_p_value(&self, t: f64, degrees_of_freedom: f64) -> f64 {
        match self.method {
            PValueMethod::Ladder => ladder(t.abs(), &T_LADDER),
            PValueMethod::Exact => match StudentsT::new(0.0, 1.0, degrees_of_freedom) {
                Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
                Err(_) => ladder(t.abs(), &T_LADDER),
            },
        }
    }

    /// Upper-tail p-value for a chi-square statistic.
    pub fn chi_square_p_value(&self, chi_square: f64, degrees_of_freedom: f64) -> f64 {
        match self.method {
            PValueMethod::Ladder => ladder(chi_square, &CHI_SQUARE_LADDER),
            PValueMethod::Exact => match ChiSquared::new(degrees_of_freedom) {
                Ok(dist) => (1.0 - dist.cdf(chi_square)).clamp(0.0, 1.0),
                Err(_) => ladder(chi_square, &CHI_SQUARE_LADDER),
            },
        }
    }

    pub fn significance(&self, p_value: f64) -> Significance {
        if p_value < self.significance_level {
            Significance::Significant
        } else {
            Significance::NotSignificant
        }
    }
}

impl Default for PValuePolicy {
    fn default() -> Self {
        Self::new(PValueMethod::Ladder, 0.05)
    }
}

fn ladder(statistic: f64, steps: &[(f64, f64)]) -> f64 {
    steps
        .iter()
        .find(|(threshold, _)| statistic > *threshold)
        .map(|(_, p)| *p)
        .unwrap_or(LADDER_FLOOR)
}
