//! Survey-level entry point.
//!
//! Questions are analyzed independently on the blocking pool (bounded by
//! `max_concurrency`), then corpus-wide text results, question performance,
//! cross-tabs and the response trend are computed in one serial pass so the
//! report does not depend on task scheduling.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use survey_insights_core::{
    daily_response_counts, AnalyticsError, EngineConfig, QuestionInput, QuestionResponses, Result,
    SurveyAnalysisRequest, TimeSeriesPoint,
};
use survey_insights_stats::{
    CorrelationEngine, CrossTabulator, DescriptiveStatsCalculator, HypothesisTestEngine, PValuePolicy,
    QuestionPerformanceAnalyzer, TrendAnalyzer, TrendResult,
};
use survey_insights_text::{LexiconStore, TextAnalytics, TextPartial};
use tokio::sync::Semaphore;
use validator::Validate;

use crate::choice::ChoiceDistribution;
use crate::insights::key_insights;
use crate::report::{CrossTabInsight, InsightReport, QuestionAnalysis, QuestionInsight, SkippedAnalysis};

const SURVEY_SCOPE: &str = "survey";

/// Result of one question's branch before the reduce step.
#[derive(Debug, Default)]
struct QuestionOutcome {
    analysis: Option<QuestionAnalysis>,
    text: Option<TextPartial>,
    skipped: Option<SkippedAnalysis>,
}

#[derive(Debug, Clone)]
pub struct AnalyticsOrchestrator {
    config: EngineConfig,
    text: Arc<TextAnalytics>,
    performance: QuestionPerformanceAnalyzer,
    cross_tabs: CrossTabulator,
    trend: TrendAnalyzer,
}

impl AnalyticsOrchestrator {
    /// Validate the configuration and build every analyzer once.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let config = config.validated()?;
        let lexicon = LexiconStore::with_overrides(&config.lexicon);
        let policy = PValuePolicy::from_config(&config);

        Ok(Self {
            text: Arc::new(TextAnalytics::new(lexicon, config.text.clone())),
            performance: QuestionPerformanceAnalyzer::new(
                config.performance.clone(),
                CorrelationEngine::new(policy),
            ),
            cross_tabs: CrossTabulator::new(HypothesisTestEngine::new(policy)),
            trend: TrendAnalyzer::new(config.trend.clone()),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the insight report for one survey, stamped with the current time.
    /// Only an invalid request is an error; failing sub-analyses are listed in
    /// `InsightReport::skipped`.
    pub async fn analyze(&self, request: &SurveyAnalysisRequest) -> Result<InsightReport> {
        self.analyze_at(request, Utc::now()).await
    }

    /// Same as [`analyze`](Self::analyze) with a caller-supplied `generated_at`.
    /// Equal requests and timestamps give identical reports.
    pub async fn analyze_at(
        &self,
        request: &SurveyAnalysisRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<InsightReport> {
        request.validate()?;
        tracing::info!(
            survey_id = %request.survey_id,
            questions = request.questions.len(),
            metrics = request.metrics.len(),
            "Starting survey analysis"
        );

        let outcomes = self.analyze_questions(&request.questions).await;

        let mut questions = Vec::with_capacity(outcomes.len());
        let mut partials = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            questions.extend(outcome.analysis);
            partials.extend(outcome.text);
            skipped.extend(outcome.skipped);
        }

        let text = if partials.is_empty() {
            None
        } else {
            Some(self.text.reduce(&partials))
        };

        let performance = if request.metrics.is_empty() {
            None
        } else {
            match self.performance.analyze(&request.metrics) {
                Ok(report) => Some(report),
                Err(e) => {
                    skipped.push(skip(SURVEY_SCOPE, "performance", &e));
                    None
                }
            }
        };

        let mut cross_tabs = Vec::with_capacity(request.cross_tabs.len());
        for pair in &request.cross_tabs {
            match self.cross_tabulate(request, &pair.row_question, &pair.column_question) {
                Ok(result) => cross_tabs.push(CrossTabInsight {
                    row_question: pair.row_question.clone(),
                    column_question: pair.column_question.clone(),
                    result,
                }),
                Err(e) => {
                    let scope = format!("{} x {}", pair.row_question, pair.column_question);
                    skipped.push(skip(&scope, "crossTab", &e));
                }
            }
        }

        let trend = match self.response_trend(request) {
            Some(Ok(result)) => Some(result),
            Some(Err(e)) => {
                skipped.push(skip(SURVEY_SCOPE, "trend", &e));
                None
            }
            None => None,
        };

        let mut report = InsightReport {
            survey_id: request.survey_id.clone(),
            generated_at,
            questions,
            text,
            performance,
            cross_tabs,
            trend,
            key_insights: Vec::new(),
            skipped,
        };
        report.key_insights = key_insights(&report);

        tracing::info!(
            survey_id = %report.survey_id,
            questions = report.questions.len(),
            skipped = report.skipped.len(),
            "Survey analysis completed"
        );
        Ok(report)
    }

    /// Parallel map over questions; results come back in request order.
    async fn analyze_questions(&self, questions: &[QuestionInput]) -> Vec<QuestionOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut handles = Vec::with_capacity(questions.len());

        for question in questions {
            let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
            let text = Arc::clone(&self.text);
            let question = question.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                analyze_question(&text, question)
            }));
        }

        join_all(handles)
            .await
            .into_iter()
            .zip(questions)
            .map(|(joined, question)| {
                joined.unwrap_or_else(|e| {
                    tracing::warn!(question_id = %question.id, error = %e, "Question task failed");
                    QuestionOutcome {
                        skipped: Some(SkippedAnalysis::new(&question.id, "question", format!("task failed: {}", e))),
                        ..Default::default()
                    }
                })
            })
            .collect()
    }

    fn cross_tabulate(
        &self,
        request: &SurveyAnalysisRequest,
        row_question: &str,
        column_question: &str,
    ) -> Result<survey_insights_stats::CrossTabResult> {
        let rows = choice_selections(request, row_question)?;
        let columns = choice_selections(request, column_question)?;
        self.cross_tabs.cross_tabulate(rows, columns)
    }

    /// Trend over the supplied series, or over daily counts of raw responses.
    /// `None` when the request carries neither.
    fn response_trend(&self, request: &SurveyAnalysisRequest) -> Option<Result<TrendResult>> {
        let series: Vec<TimeSeriesPoint> = if request.response_series.is_empty() {
            daily_response_counts(&request.responses)
        } else {
            request.response_series.clone()
        };
        if series.is_empty() {
            return None;
        }
        tracing::debug!(points = series.len(), "Analyzing response trend");
        Some(self.trend.analyze(&series))
    }
}

fn analyze_question(text: &TextAnalytics, question: QuestionInput) -> QuestionOutcome {
    tracing::debug!(question_id = %question.id, kind = ?question.responses.kind(), "Analyzing question");
    let kind = question.responses.kind();
    let response_count = question.responses.len();

    let (insight, partial) = match &question.responses {
        QuestionResponses::Numeric { values } | QuestionResponses::Rating { values, .. } => {
            match DescriptiveStatsCalculator::calculate(values) {
                Ok(stats) => (QuestionInsight::Descriptive(stats), None),
                Err(e) => {
                    return QuestionOutcome {
                        skipped: Some(skip(&question.id, "descriptive", &e)),
                        ..Default::default()
                    };
                }
            }
        }
        QuestionResponses::Text { answers } => {
            let partial = text.partial(answers);
            let insights = text.reduce(std::slice::from_ref(&partial));
            (QuestionInsight::Text(Box::new(insights)), Some(partial))
        }
        QuestionResponses::Choice { options, selections } => (
            QuestionInsight::Choice(ChoiceDistribution::from_selections(options, selections)),
            None,
        ),
    };

    QuestionOutcome {
        analysis: Some(QuestionAnalysis {
            question_id: question.id,
            question_text: question.text,
            kind,
            response_count,
            insight,
        }),
        text: partial,
        skipped: None,
    }
}

fn choice_selections<'a>(request: &'a SurveyAnalysisRequest, id: &str) -> Result<&'a [String]> {
    match request.question(id).map(|q| &q.responses) {
        Some(QuestionResponses::Choice { selections, .. }) => Ok(selections),
        Some(other) => Err(AnalyticsError::InvalidInput(format!(
            "question '{}' is {:?}, cross-tabulation needs a choice question",
            id,
            other.kind()
        ))),
        None => Err(AnalyticsError::InvalidInput(format!("unknown question '{}'", id))),
    }
}

fn skip(scope: &str, analysis: &str, error: &AnalyticsError) -> SkippedAnalysis {
    tracing::warn!(scope, analysis, kind = error.kind(), error = %error, "Skipping analysis");
    SkippedAnalysis::new(scope, analysis, error)
}
