use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::{Validate, ValidationError};

/// Raw answers for one question, tagged by question type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionResponses {
    Numeric {
        values: Vec<f64>,
    },
    Rating {
        scale: u8,
        values: Vec<f64>,
    },
    Text {
        answers: Vec<String>,
    },
    Choice {
        #[serde(default)]
        options: Vec<String>,
        selections: Vec<String>,
    },
}

impl QuestionResponses {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Numeric { .. } => QuestionKind::Numeric,
            Self::Rating { .. } => QuestionKind::Rating,
            Self::Text { .. } => QuestionKind::Text,
            Self::Choice { .. } => QuestionKind::Choice,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric { values } | Self::Rating { values, .. } => values.len(),
            Self::Text { answers } => answers.len(),
            Self::Choice { selections, .. } => selections.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view of the answers, if the question type carries numbers.
    pub fn numeric_values(&self) -> Option<&[f64]> {
        match self {
            Self::Numeric { values } | Self::Rating { values, .. } => Some(values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Numeric,
    Rating,
    Text,
    Choice,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    #[validate(length(min = 1, max = 255))]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[validate(custom(function = "validate_responses"))]
    pub responses: QuestionResponses,
}

impl QuestionInput {
    pub fn new(id: impl Into<String>, text: impl Into<String>, responses: QuestionResponses) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            responses,
        }
    }
}

fn validate_responses(responses: &QuestionResponses) -> Result<(), ValidationError> {
    match responses {
        QuestionResponses::Numeric { values } => {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ValidationError::new("non_finite_value"));
            }
        }
        QuestionResponses::Rating { scale, values } => {
            if *scale == 0 {
                return Err(ValidationError::new("zero_rating_scale"));
            }
            let max = f64::from(*scale);
            if values.iter().any(|v| !v.is_finite() || *v < 1.0 || *v > max) {
                return Err(ValidationError::new("rating_out_of_scale"));
            }
        }
        QuestionResponses::Text { .. } => {}
        QuestionResponses::Choice {
            options,
            selections,
        } => {
            if !options.is_empty() {
                let declared: BTreeSet<&str> = options.iter().map(String::as_str).collect();
                if selections.iter().any(|s| !declared.contains(s.as_str())) {
                    return Err(ValidationError::new("undeclared_choice"));
                }
            }
        }
    }
    Ok(())
}
