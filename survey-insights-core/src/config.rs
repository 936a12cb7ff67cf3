use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

// ===== P-value Policy =====

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PValueMethod {
    /// Fixed threshold table mapping the absolute statistic to a canned p-value.
    #[default]
    Ladder,
    /// Student-t and chi-square distribution functions.
    Exact,
}

// ===== Question Performance Thresholds =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct PerformanceThresholds {
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_response_rate: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub max_avg_time_seconds: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_drop_off_rate: f64,
    #[validate(range(min = 2))]
    pub min_correlation_points: usize,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            min_response_rate: 80.0,
            max_avg_time_seconds: 60.0,
            max_drop_off_rate: 10.0,
            min_correlation_points: 3,
        }
    }
}

// ===== Trend Settings =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct TrendConfig {
    #[validate(range(max = 365))]
    pub forecast_periods: usize,
    #[validate(range(min = 1))]
    pub seasonality_period: usize,
    #[validate(range(min = 2))]
    pub seasonality_min_points: usize,
    pub seasonality_threshold: f64,
    #[validate(range(min = 0.0))]
    pub stable_slope_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            forecast_periods: 7,
            seasonality_period: 7,
            seasonality_min_points: 14,
            seasonality_threshold: 0.3,
            stable_slope_threshold: 0.01,
        }
    }
}

// ===== Text Analytics Settings =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct TextConfig {
    #[validate(range(min = 1))]
    pub top_keywords: usize,
    #[validate(range(min = 1))]
    pub max_themes: usize,
    #[validate(range(min = 1))]
    pub min_phrase_frequency: usize,
    #[validate(range(min = 1))]
    pub min_theme_responses: usize,
    #[validate(range(min = 1))]
    pub word_cloud_size: usize,
    pub min_word_length: usize,
    pub uncategorized_preview: usize,
    pub sample_responses: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            top_keywords: 10,
            max_themes: 20,
            min_phrase_frequency: 2,
            min_theme_responses: 2,
            word_cloud_size: 50,
            min_word_length: 3,
            uncategorized_preview: 10,
            sample_responses: 3,
        }
    }
}

// ===== Lexicon Overrides =====

/// Valence range of the built-in sentiment lexicon.
pub const SENTIMENT_SCORE_RANGE: std::ops::RangeInclusive<i32> = -5..=5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct LexiconOverrides {
    /// Words added to the built-in stop-word list.
    pub extra_stop_words: Vec<String>,
    /// Sentiment scores that replace or extend the built-in lexicon, each in -5..=5.
    #[validate(custom(function = "validate_sentiment_overrides"))]
    pub sentiment_overrides: BTreeMap<String, i32>,
}

fn validate_sentiment_overrides(overrides: &BTreeMap<String, i32>) -> Result<(), ValidationError> {
    if overrides.values().any(|score| !SENTIMENT_SCORE_RANGE.contains(score)) {
        return Err(ValidationError::new("sentiment_score_out_of_range"));
    }
    Ok(())
}

// ===== Engine Configuration =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct EngineConfig {
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub significance_level: f64,
    pub p_value_method: PValueMethod,
    #[validate(nested)]
    pub trend: TrendConfig,
    #[validate(nested)]
    pub performance: PerformanceThresholds,
    #[validate(nested)]
    pub text: TextConfig,
    #[validate(nested)]
    pub lexicon: LexiconOverrides,
    #[validate(range(min = 1, max = 256))]
    pub max_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            p_value_method: PValueMethod::Ladder,
            trend: TrendConfig::default(),
            performance: PerformanceThresholds::default(),
            text: TextConfig::default(),
            lexicon: LexiconOverrides::default(),
            max_concurrency: 4,
        }
    }
}

impl EngineConfig {
    /// Validate and return the configuration, converting failures into the engine error type.
    pub fn validated(self) -> crate::Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
