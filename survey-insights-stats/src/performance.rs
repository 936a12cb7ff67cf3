use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use survey_insights_core::{PerformanceThresholds, QuestionMetric, Result};

use crate::correlation::{CorrelationEngine, CorrelationResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PerformanceIssue {
    #[serde(rename_all = "camelCase")]
    LowResponseRate { response_rate: f64 },
    #[serde(rename_all = "camelCase")]
    SlowCompletion { avg_time_seconds: f64 },
    #[serde(rename_all = "camelCase")]
    HighDropOff { drop_off_rate: f64 },
}

impl PerformanceIssue {
    pub fn recommendation(&self, question_text: &str) -> String {
        match self {
            Self::LowResponseRate { response_rate } => format!(
                "\"{}\" has a low response rate ({:.1}%). Consider simplifying the wording or making it optional.",
                question_text, response_rate
            ),
            Self::SlowCompletion { avg_time_seconds } => format!(
                "\"{}\" takes {:.0}s on average to answer. Consider breaking it into smaller questions.",
                question_text, avg_time_seconds
            ),
            Self::HighDropOff { drop_off_rate } => format!(
                "\"{}\" loses {:.1}% of respondents. Review its placement and whether it feels intrusive.",
                question_text, drop_off_rate
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemQuestion {
    pub id: String,
    pub question_text: String,
    pub issues: Vec<PerformanceIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricCorrelation {
    pub first_metric: String,
    pub second_metric: String,
    pub result: CorrelationResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPerformanceReport {
    pub analyzed_questions: usize,
    pub average_response_rate: Option<f64>,
    pub problem_questions: Vec<ProblemQuestion>,
    pub recommendations: Vec<String>,
    pub correlations: Vec<MetricCorrelation>,
}

/// Flags problem questions and relates completion time and drop-off to response rate.
#[derive(Debug, Clone, Default)]
pub struct QuestionPerformanceAnalyzer {
    thresholds: PerformanceThresholds,
    correlation: CorrelationEngine,
}

impl QuestionPerformanceAnalyzer {
    pub fn new(thresholds: PerformanceThresholds, correlation: CorrelationEngine) -> Self {
        Self {
            thresholds,
            correlation,
        }
    }

    /// Repeated question ids are analyzed once, using their first entry.
    pub fn analyze(&self, metrics: &[QuestionMetric]) -> Result<QuestionPerformanceReport> {
        let mut seen = BTreeSet::new();
        let metrics: Vec<&QuestionMetric> = metrics
            .iter()
            .filter(|m| seen.insert(m.id.as_str()))
            .collect();

        let mut problem_questions = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();

        for metric in &metrics {
            let issues = self.issues(metric);
            if issues.is_empty() {
                continue;
            }
            for issue in &issues {
                let recommendation = issue.recommendation(&metric.question_text);
                if !recommendations.contains(&recommendation) {
                    recommendations.push(recommendation);
                }
            }
            problem_questions.push(ProblemQuestion {
                id: metric.id.clone(),
                question_text: metric.question_text.clone(),
                issues,
            });
        }

        let mut correlations = Vec::new();
        if let Some(result) = self.correlate_with_response_rate(&metrics, |m| m.avg_time_seconds)? {
            correlations.push(MetricCorrelation {
                first_metric: "avgTimeSeconds".to_string(),
                second_metric: "responseRate".to_string(),
                result,
            });
        }
        if let Some(result) = self.correlate_with_response_rate(&metrics, |m| m.drop_off_rate)? {
            correlations.push(MetricCorrelation {
                first_metric: "dropOffRate".to_string(),
                second_metric: "responseRate".to_string(),
                result,
            });
        }

        let average_response_rate = (!metrics.is_empty()).then(|| {
            metrics.iter().map(|m| m.response_rate).sum::<f64>() / metrics.len() as f64
        });

        Ok(QuestionPerformanceReport {
            analyzed_questions: metrics.len(),
            average_response_rate,
            problem_questions,
            recommendations,
            correlations,
        })
    }

    fn issues(&self, metric: &QuestionMetric) -> Vec<PerformanceIssue> {
        let mut issues = Vec::new();
        if metric.response_rate < self.thresholds.min_response_rate {
            issues.push(PerformanceIssue::LowResponseRate {
                response_rate: metric.response_rate,
            });
        }
        if let Some(seconds) = metric.avg_time_seconds {
            if seconds > self.thresholds.max_avg_time_seconds {
                issues.push(PerformanceIssue::SlowCompletion {
                    avg_time_seconds: seconds,
                });
            }
        }
        if let Some(rate) = metric.drop_off_rate {
            if rate > self.thresholds.max_drop_off_rate {
                issues.push(PerformanceIssue::HighDropOff {
                    drop_off_rate: rate,
                });
            }
        }
        issues
    }

    fn correlate_with_response_rate(
        &self,
        metrics: &[&QuestionMetric],
        select: impl Fn(&QuestionMetric) -> Option<f64>,
    ) -> Result<Option<CorrelationResult>> {
        let (selected, response_rates): (Vec<f64>, Vec<f64>) = metrics
            .iter()
            .filter_map(|&m| select(m).map(|value| (value, m.response_rate)))
            .unzip();

        if selected.len() < self.thresholds.min_correlation_points {
            return Ok(None);
        }
        self.correlation.correlate(&selected, &response_rates).map(Some)
    }
}
