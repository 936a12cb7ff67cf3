use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::metric::QuestionMetric;
use super::question::QuestionInput;
use super::series::{response_span_days, ResponseRecord, TimeSeriesPoint, MAX_RESPONSE_SPAN_DAYS};

/// Pair of choice questions whose selections are aligned by respondent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabRequest {
    pub row_question: String,
    pub column_question: String,
}

/// Everything the orchestrator needs to build one survey's insight report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnalysisRequest {
    #[validate(length(min = 1, max = 255))]
    pub survey_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
    #[serde(default)]
    #[validate(nested)]
    pub metrics: Vec<QuestionMetric>,
    #[serde(default)]
    pub response_series: Vec<TimeSeriesPoint>,
    #[serde(default)]
    #[validate(custom(function = "validate_response_span"))]
    pub responses: Vec<ResponseRecord>,
    #[serde(default)]
    pub cross_tabs: Vec<CrossTabRequest>,
}

impl SurveyAnalysisRequest {
    pub fn new(survey_id: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            ..Default::default()
        }
    }

    pub fn question(&self, id: &str) -> Option<&QuestionInput> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Parse and validate a request from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }
}

fn validate_response_span(records: &[ResponseRecord]) -> Result<(), ValidationError> {
    match response_span_days(records) {
        Some(days) if days > MAX_RESPONSE_SPAN_DAYS => Err(ValidationError::new("response_span_too_wide")),
        _ => Ok(()),
    }
}
