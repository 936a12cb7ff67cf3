//! Plain-language headlines derived from a finished report.

use survey_insights_stats::{QuestionPerformanceReport, TrendDirection, TrendResult};
use survey_insights_text::{SentimentLabel, TextInsights, ThemeCategory};

use crate::report::InsightReport;

pub fn key_insights(report: &InsightReport) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(text) = &report.text {
        insights.extend(text_insights(text));
    }
    if let Some(trend) = &report.trend {
        insights.extend(trend_insights(trend));
    }
    if let Some(performance) = &report.performance {
        insights.extend(performance_insight(performance));
    }
    for cross_tab in &report.cross_tabs {
        if cross_tab.result.chi_square.significance.is_significant() {
            insights.push(format!(
                "Answers to \"{}\" and \"{}\" are associated (Cramér's V {:.2})",
                cross_tab.row_question, cross_tab.column_question, cross_tab.result.cramers_v
            ));
        }
    }

    insights
}

fn text_insights(text: &TextInsights) -> Vec<String> {
    let mut insights = Vec::new();
    let responses = text.statistics.total_responses;
    if responses == 0 {
        return insights;
    }

    let overall = &text.sentiment.overall;
    insights.push(format!(
        "Overall sentiment is {} across {} text responses ({:.0}% agree)",
        sentiment_word(overall.label),
        responses,
        overall.confidence * 100.0
    ));

    if let Some(topic) = text.topics.dominant() {
        insights.push(format!(
            "Most discussed topic: {} ({} mentions, {:.1}% of responses, {} sentiment)",
            topic.topic.label(),
            topic.mention_count,
            topic.percentage,
            sentiment_word(topic.sentiment)
        ));
    }

    if let Some(theme) = text.themes.first() {
        insights.push(format!(
            "Top theme: \"{}\" ({}, {} responses)",
            theme.phrase,
            category_word(theme.category),
            theme.response_count
        ));
    }

    insights
}

fn trend_insights(trend: &TrendResult) -> Vec<String> {
    let mut insights = vec![match trend.trend {
        TrendDirection::Stable => "Response volume is stable".to_string(),
        TrendDirection::Increasing => format!("Responses are increasing by {:.2} per day", trend.slope),
        TrendDirection::Decreasing => format!("Responses are decreasing by {:.2} per day", trend.slope.abs()),
    }];
    if trend.seasonality.detected {
        insights.push(format!(
            "A {}-day seasonal pattern was detected in responses",
            trend.seasonality.period.unwrap_or_default()
        ));
    }
    insights
}

fn performance_insight(performance: &QuestionPerformanceReport) -> Option<String> {
    let flagged = performance.problem_questions.len();
    if flagged == 0 {
        return None;
    }
    Some(format!(
        "{} of {} questions need attention",
        flagged, performance.analyzed_questions
    ))
}

fn sentiment_word(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Negative => "negative",
        SentimentLabel::Neutral => "neutral",
    }
}

fn category_word(category: ThemeCategory) -> &'static str {
    match category {
        ThemeCategory::Praise => "praise",
        ThemeCategory::Complaint => "complaint",
        ThemeCategory::Issue => "issue",
        ThemeCategory::Suggestion => "suggestion",
        ThemeCategory::Theme => "theme",
    }
}
