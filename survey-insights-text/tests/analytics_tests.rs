use pretty_assertions::assert_eq;
use survey_insights_core::TextConfig;
use survey_insights_text::*;

fn analytics() -> TextAnalytics {
    TextAnalytics::new(LexiconStore::builtin(), TextConfig::default())
}

#[test]
fn test_blank_answers_are_dropped() {
    let partial = analytics().partial(&["", "   ", " fast checkout "]);
    assert_eq!(partial.texts, vec!["fast checkout"]);
    assert_eq!(partial.scores.len(), 1);
}

#[test]
fn test_blank_corpus_degrades_to_neutral() {
    let insights = analytics().analyze(&["", "  "]);

    assert_eq!(insights.sentiment, SentimentResult::neutral());
    assert!(insights.themes.is_empty());
    assert!(insights.word_cloud.is_empty());
    assert!(insights.topics.topics.is_empty());
    assert_eq!(insights.statistics.total_responses, 0);
}

#[test]
fn test_reduce_merges_questions() {
    let analytics = analytics();
    let first = analytics.partial(&["checkout is fast", "checkout is great"]);
    let second = analytics.partial(&["checkout crashed"]);

    let insights = analytics.reduce(&[first, second]);
    assert_eq!(insights.statistics.total_responses, 3);
    assert_eq!(insights.word_cloud[0].text, "checkout");
    assert_eq!(insights.word_cloud[0].value, 3);
    assert_eq!(insights.topics.dominant().map(|t| t.topic), Some(Topic::Performance));
}

#[test]
fn test_insights_json_shape() {
    let json = serde_json::to_value(analytics().analyze(&["great support team"])).unwrap();
    for key in ["sentiment", "themes", "topics", "wordCloud", "statistics"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
