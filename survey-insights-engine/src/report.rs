use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_insights_core::QuestionKind;
use survey_insights_stats::{CrossTabResult, DescriptiveStats, QuestionPerformanceReport, TrendResult};
use survey_insights_text::TextInsights;

use crate::choice::ChoiceDistribution;

/// Per-question result, shaped by question type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "result", rename_all = "camelCase")]
pub enum QuestionInsight {
    Descriptive(DescriptiveStats),
    Text(Box<TextInsights>),
    Choice(ChoiceDistribution),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalysis {
    pub question_id: String,
    pub question_text: String,
    pub kind: QuestionKind,
    pub response_count: usize,
    pub insight: QuestionInsight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabInsight {
    pub row_question: String,
    pub column_question: String,
    pub result: CrossTabResult,
}

/// A sub-analysis that could not run; the rest of the report is still produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAnalysis {
    pub scope: String,
    pub analysis: String,
    pub reason: String,
}

impl SkippedAnalysis {
    pub fn new(scope: impl Into<String>, analysis: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            scope: scope.into(),
            analysis: analysis.into(),
            reason: reason.to_string(),
        }
    }
}

/// Everything the orchestrator learned about one survey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub survey_id: String,
    pub generated_at: DateTime<Utc>,
    pub questions: Vec<QuestionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<QuestionPerformanceReport>,
    pub cross_tabs: Vec<CrossTabInsight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendResult>,
    pub key_insights: Vec<String>,
    pub skipped: Vec<SkippedAnalysis>,
}

impl InsightReport {
    pub fn question(&self, id: &str) -> Option<&QuestionAnalysis> {
        self.questions.iter().find(|q| q.question_id == id)
    }

    /// Whether every requested sub-analysis ran.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
