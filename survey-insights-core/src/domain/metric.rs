use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-question performance snapshot supplied by the caller for each analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMetric {
    #[validate(length(min = 1, max = 255))]
    pub id: String,
    pub question_text: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub response_rate: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub avg_time_seconds: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub drop_off_rate: Option<f64>,
}

impl QuestionMetric {
    pub fn new(id: impl Into<String>, question_text: impl Into<String>, response_rate: f64) -> Self {
        Self {
            id: id.into(),
            question_text: question_text.into(),
            response_rate,
            avg_time_seconds: None,
            drop_off_rate: None,
        }
    }

    pub fn with_avg_time(mut self, seconds: f64) -> Self {
        self.avg_time_seconds = Some(seconds);
        self
    }

    pub fn with_drop_off(mut self, rate: f64) -> Self {
        self.drop_off_rate = Some(rate);
        self
    }
}
