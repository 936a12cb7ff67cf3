use pretty_assertions::assert_eq;
use std::fs;
use survey_insights_cli::config::load_from;
use survey_insights_core::{EngineConfig, PValueMethod};
use tempfile::TempDir;

fn workspace_with(default: Option<&str>, local: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    if let Some(contents) = default {
        fs::write(dir.path().join("config/default.toml"), contents).unwrap();
    }
    if let Some(contents) = local {
        fs::write(dir.path().join("config/local.toml"), contents).unwrap();
    }
    dir
}

#[test]
fn test_missing_files_use_defaults() {
    let dir = workspace_with(None, None);
    let config = load_from(dir.path(), "SURVEY_INSIGHTS_TEST_DEFAULTS").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_local_overrides_default() {
    let dir = workspace_with(
        Some(
            r#"
significance_level = 0.01
p_value_method = "exact"

[text]
max_themes = 5
"#,
        ),
        Some(
            r#"
[text]
max_themes = 8

[lexicon.sentiment_overrides]
sluggish = -2
"#,
        ),
    );

    let config = load_from(dir.path(), "SURVEY_INSIGHTS_TEST_LAYERS").unwrap();
    assert_eq!(config.significance_level, 0.01);
    assert_eq!(config.p_value_method, PValueMethod::Exact);
    assert_eq!(config.text.max_themes, 8);
    assert_eq!(config.text.top_keywords, 10);
    assert_eq!(config.lexicon.sentiment_overrides.get("sluggish"), Some(&-2));
}

#[test]
fn test_environment_overrides_files() {
    let dir = workspace_with(Some("max_concurrency = 2\n"), None);
    std::env::set_var("SURVEY_INSIGHTS_TEST_ENV__MAX_CONCURRENCY", "8");
    std::env::set_var("SURVEY_INSIGHTS_TEST_ENV__TREND__FORECAST_PERIODS", "14");

    let config = load_from(dir.path(), "SURVEY_INSIGHTS_TEST_ENV").unwrap();
    assert_eq!(config.max_concurrency, 8);
    assert_eq!(config.trend.forecast_periods, 14);
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = workspace_with(Some("significance_level = 2.0\n"), None);
    let error = load_from(dir.path(), "SURVEY_INSIGHTS_TEST_INVALID").unwrap_err();
    assert!(format!("{error:#}").contains("invalid configuration"));
}
