use pretty_assertions::assert_eq;
use survey_insights_core::config::*;
use validator::Validate;

// ===== EngineConfig Defaults =====

#[test]
fn test_engine_config_default() {
    let config = EngineConfig::default();

    assert_eq!(config.significance_level, 0.05);
    assert_eq!(config.p_value_method, PValueMethod::Ladder);
    assert_eq!(config.trend.forecast_periods, 7);
    assert_eq!(config.trend.seasonality_period, 7);
    assert_eq!(config.trend.seasonality_min_points, 14);
    assert_eq!(config.performance.min_response_rate, 80.0);
    assert_eq!(config.performance.max_avg_time_seconds, 60.0);
    assert_eq!(config.performance.max_drop_off_rate, 10.0);
    assert_eq!(config.text.top_keywords, 10);
    assert_eq!(config.text.max_themes, 20);
    assert_eq!(config.text.uncategorized_preview, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_engine_config_partial_json_uses_defaults() {
    let json = r#"{"significance_level": 0.01, "text": {"top_keywords": 5}}"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.significance_level, 0.01);
    assert_eq!(config.text.top_keywords, 5);
    assert_eq!(config.text.max_themes, 20);
    assert_eq!(config.max_concurrency, 4);
}

#[test]
fn test_p_value_method_serialization() {
    assert_eq!(serde_json::to_string(&PValueMethod::Ladder).unwrap(), "\"ladder\"");
    let exact: PValueMethod = serde_json::from_str("\"exact\"").unwrap();
    assert_eq!(exact, PValueMethod::Exact);
}

// ===== Validation =====

#[test]
fn test_significance_level_out_of_range() {
    let config = EngineConfig {
        significance_level: 1.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
    assert!(config.validated().is_err());
}

#[test]
fn test_nested_text_config_validation() {
    let mut config = EngineConfig::default();
    config.text.top_keywords = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_concurrency_rejected() {
    let config = EngineConfig {
        max_concurrency: 0,
        ..Default::default()
    };
    assert!(config.validated().is_err());
}

#[test]
fn test_lexicon_overrides_roundtrip() {
    let mut config = EngineConfig::default();
    config.lexicon.extra_stop_words.push("survey".to_string());
    config.lexicon.sentiment_overrides.insert("meh".to_string(), -1);

    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn test_sentiment_override_outside_lexicon_range_rejected() {
    let mut config = EngineConfig::default();
    config.lexicon.sentiment_overrides.insert("meh".to_string(), -5);
    assert!(config.clone().validated().is_ok());

    config.lexicon.sentiment_overrides.insert("awful".to_string(), i32::MIN);
    assert!(matches!(
        config.validated(),
        Err(survey_insights_core::AnalyticsError::Validation(_))
    ));
}
