use pretty_assertions::assert_eq;
use rstest::rstest;
use survey_insights_core::TextConfig;
use survey_insights_text::*;

fn extractor() -> ThemeExtractor {
    let lexicon = LexiconStore::builtin();
    ThemeExtractor::new(lexicon.clone(), SentimentScorer::new(lexicon, 10), TextConfig::default())
}

fn phrases(themes: &[Theme]) -> Vec<&str> {
    themes.iter().map(|t| t.phrase.as_str()).collect()
}

#[test]
fn test_praise_theme() {
    let texts = [
        "Customer support was great",
        "customer support was amazing!",
        "Customer support is slow",
        "The interface is clean",
    ];
    let themes = extractor().extract(&texts);

    assert_eq!(phrases(&themes), vec!["customer support"]);
    let theme = &themes[0];
    assert_eq!(theme.frequency, 3);
    assert_eq!(theme.response_count, 3);
    assert_eq!(theme.category, ThemeCategory::Praise);
    assert_eq!(theme.sentiment, SentimentLabel::Positive);
    assert_eq!(theme.sample_responses.len(), 3);
    assert_eq!(theme.sample_responses[0], "Customer support was great");
}

#[test]
fn test_issue_themes_tie_alphabetically() {
    let themes = extractor().extract(&["login page error again", "login page error today"]);

    assert_eq!(phrases(&themes), vec!["login page", "login page error", "page error"]);
    assert!(themes.iter().all(|t| t.category == ThemeCategory::Issue));
}

#[rstest]
#[case(&["checkout flow felt terrible", "checkout flow felt awful"], ThemeCategory::Complaint)]
#[case(&["please add dark mode", "please add dark mode soon"], ThemeCategory::Suggestion)]
#[case(&["mobile app on android", "mobile app on tablet"], ThemeCategory::Theme)]
fn test_categories(#[case] texts: &[&str], #[case] expected: ThemeCategory) {
    let themes = extractor().extract(texts);
    assert!(!themes.is_empty());
    assert!(themes.iter().all(|t| t.category == expected), "{themes:?}");
}

#[test]
fn test_theme_needs_two_matching_responses() {
    let themes = extractor().extract(&["great app great app", "something else entirely"]);
    assert!(themes.is_empty());
}

#[test]
fn test_boundary_stop_words_excluded() {
    let counts = extractor().phrase_counts(&["the search is fast"]);
    assert_eq!(counts.get("the search"), 0);
    assert_eq!(counts.get("search is"), 0);
    assert_eq!(counts.get("search is fast"), 1);
}

#[test]
fn test_max_themes_truncates() {
    let lexicon = LexiconStore::builtin();
    let config = TextConfig {
        max_themes: 1,
        ..TextConfig::default()
    };
    let extractor = ThemeExtractor::new(lexicon.clone(), SentimentScorer::new(lexicon, 10), config);

    let themes = extractor.extract(&["login page error again", "login page error today"]);
    assert_eq!(phrases(&themes), vec!["login page"]);
}

#[test]
fn test_merged_counts_build_same_themes() {
    let extractor = extractor();
    let first = ["dark mode please", "dark mode now"];
    let second = ["dark mode would help"];

    let mut counts = extractor.phrase_counts(&first);
    counts.merge(&extractor.phrase_counts(&second));
    let corpus: Vec<&str> = first.iter().chain(second.iter()).copied().collect();

    assert_eq!(counts.get("dark mode"), 3);
    assert_eq!(extractor.themes_from_counts(&counts, &corpus), extractor.extract(&corpus));
}

#[test]
fn test_theme_json_shape() {
    let themes = extractor().extract(&["login page error again", "login page error today"]);
    let json = serde_json::to_value(&themes[0]).unwrap();
    assert_eq!(json["category"], "issue");
    assert_eq!(json["responseCount"], 2);
    assert!(json["sentimentScore"].is_number());
}
