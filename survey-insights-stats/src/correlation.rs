use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use survey_insights_core::{ensure_finite, ensure_same_length, AnalyticsError, Result};

use crate::pvalue::{PValuePolicy, Significance};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r < 0.2 {
            Self::VeryWeak
        } else if r < 0.4 {
            Self::Weak
        } else if r < 0.6 {
            Self::Moderate
        } else if r < 0.8 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    pub sample_size: usize,
    pub p_value: Option<f64>,
    pub significance: Option<Significance>,
}

/// Pearson correlation with strength/direction classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationEngine {
    policy: PValuePolicy,
}

impl CorrelationEngine {
    pub fn new(policy: PValuePolicy) -> Self {
        Self { policy }
    }

    pub fn correlate(&self, x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
        ensure_same_length(x.len(), y.len())?;
        if x.len() < 2 {
            return Err(AnalyticsError::InsufficientData {
                required: 2,
                actual: x.len(),
            });
        }
        ensure_finite(x, "first correlation sample")?;
        ensure_finite(y, "second correlation sample")?;

        let n = x.len();
        let Some(r) = Self::pearson(x, y) else {
            // No variance in at least one sample.
            return Ok(CorrelationResult {
                coefficient: 0.0,
                strength: CorrelationStrength::VeryWeak,
                direction: CorrelationDirection::Positive,
                sample_size: n,
                p_value: None,
                significance: None,
            });
        };

        let t = Self::t_statistic(r, n);
        let p_value = self.policy.t_p_value(t, (n - 2) as f64);

        Ok(CorrelationResult {
            coefficient: r,
            strength: CorrelationStrength::from_coefficient(r),
            direction: if r < 0.0 {
                CorrelationDirection::Negative
            } else {
                CorrelationDirection::Positive
            },
            sample_size: n,
            p_value: Some(p_value),
            significance: Some(self.policy.significance(p_value)),
        })
    }

    /// Mean-centred Pearson coefficient; `None` when either sample has no spread.
    fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if is_constant(x) || is_constant(y) {
            return None;
        }

        let mean_x = x.mean();
        let mean_y = y.mean();
        let (mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y.iter()) {
            let (dx, dy) = (a - mean_x, b - mean_y);
            sum_xy += dx * dy;
            sum_xx += dx * dx;
            sum_yy += dy * dy;
        }

        let denominator = sum_xx.sqrt() * sum_yy.sqrt();
        if denominator < 1e-300 || !denominator.is_finite() {
            return None;
        }
        let r = sum_xy / denominator;
        if r.is_nan() {
            return None;
        }
        Some(r.clamp(-1.0, 1.0))
    }

    fn t_statistic(r: f64, n: usize) -> f64 {
        if n <= 2 {
            return 0.0;
        }
        let unexplained = 1.0 - r * r;
        if unexplained <= 0.0 {
            return f64::INFINITY.copysign(r);
        }
        r * ((n - 2) as f64 / unexplained).sqrt()
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}
