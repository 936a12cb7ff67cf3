use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use survey_insights_core::{ensure_finite, ensure_same_length, AnalyticsError, Result, TimeSeriesPoint, TrendConfig};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MIN_TREND_POINTS: usize = 3;
const CONFIDENCE_Z: f64 = 1.96;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub predicted: f64,
    pub confidence_interval: (f64, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seasonality {
    pub detected: bool,
    pub period: Option<usize>,
    pub strength: Option<f64>,
}

impl Seasonality {
    fn not_attempted() -> Self {
        Self {
            detected: false,
            period: None,
            strength: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub trend: TrendDirection,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub standard_error: f64,
    pub forecast: Vec<ForecastPoint>,
    pub seasonality: Seasonality,
}

/// Least-squares trend, forecast band and weekly seasonality over a dated series.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Analyze parallel timestamp and value arrays.
    pub fn analyze_series(&self, timestamps: &[DateTime<Utc>], values: &[f64]) -> Result<TrendResult> {
        ensure_same_length(timestamps.len(), values.len())?;
        let points: Vec<TimeSeriesPoint> = timestamps
            .iter()
            .zip(values)
            .map(|(t, v)| TimeSeriesPoint::new(*t, *v))
            .collect();
        self.analyze(&points)
    }

    pub fn analyze(&self, points: &[TimeSeriesPoint]) -> Result<TrendResult> {
        if points.len() < MIN_TREND_POINTS {
            return Err(AnalyticsError::InsufficientData {
                required: MIN_TREND_POINTS,
                actual: points.len(),
            });
        }

        let origin = points[0].timestamp;
        let x: Vec<f64> = points.iter().map(|p| day_offset(origin, p.timestamp)).collect();
        let y: Vec<f64> = points.iter().map(|p| p.value).collect();
        ensure_finite(&y, "trend values")?;

        let fit = LinearFit::least_squares(&x, &y);
        let n = y.len() as f64;
        let mean_y = y.iter().sum::<f64>() / n;

        let residual_ss: f64 = x
            .iter()
            .zip(&y)
            .map(|(xi, yi)| (yi - fit.predict(*xi)).powi(2))
            .sum();
        let total_ss: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
        let r_squared = if total_ss > 0.0 {
            (1.0 - residual_ss / total_ss).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let standard_error = (residual_ss / (n - 2.0)).sqrt();

        let trend = if fit.slope.abs() < self.config.stable_slope_threshold {
            TrendDirection::Stable
        } else if fit.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        let last = points[points.len() - 1].timestamp;
        let last_x = x[x.len() - 1];
        let margin = CONFIDENCE_Z * standard_error;
        let forecast = (1..=self.config.forecast_periods)
            .map(|period| {
                let predicted = fit.predict(last_x + period as f64);
                ForecastPoint {
                    timestamp: last + Duration::days(period as i64),
                    predicted,
                    confidence_interval: (predicted - margin, predicted + margin),
                }
            })
            .collect();

        Ok(TrendResult {
            trend,
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared,
            standard_error,
            forecast,
            seasonality: self.seasonality(&y),
        })
    }

    /// Lag-`period` autocorrelation normalized by the mean square of the centered series.
    fn seasonality(&self, values: &[f64]) -> Seasonality {
        let period = self.config.seasonality_period;
        if values.len() < self.config.seasonality_min_points || values.len() <= period {
            return Seasonality::not_attempted();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();

        let mean_square = centered.iter().map(|d| d * d).sum::<f64>() / n;
        if mean_square == 0.0 {
            return Seasonality {
                detected: false,
                period: None,
                strength: Some(0.0),
            };
        }

        let lagged: f64 = centered[period..]
            .iter()
            .zip(&centered)
            .map(|(current, earlier)| current * earlier)
            .sum::<f64>()
            / (centered.len() - period) as f64;
        let strength = lagged / mean_square;
        let detected = strength > self.config.seasonality_threshold;

        Seasonality {
            detected,
            period: detected.then_some(period),
            strength: Some(strength),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearFit {
    slope: f64,
    intercept: f64,
}

impl LinearFit {
    fn least_squares(x: &[f64], y: &[f64]) -> Self {
        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sum_x2: f64 = x.iter().map(|a| a * a).sum();

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            // All points share one timestamp.
            return Self {
                slope: 0.0,
                intercept: sum_y / n,
            };
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        Self {
            slope,
            intercept: (sum_y - slope * sum_x) / n,
        }
    }

    fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn day_offset(origin: DateTime<Utc>, timestamp: DateTime<Utc>) -> f64 {
    (timestamp - origin).num_milliseconds() as f64 / MILLIS_PER_DAY
}
