use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Length mismatch: left has {left} values, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Insufficient data: at least {required} points required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Short machine-readable kind, used when recording skipped analyses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput(_) => "empty_input",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::MissingParameter(_) => "missing_parameter",
            Self::InvalidInput(_) => "invalid_input",
            Self::Validation(_) => "validation",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AnalyticsError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalyticsError::Validation(err.to_string())
    }
}

/// Reject empty samples and samples holding NaN or infinite values.
pub fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyInput(what.to_string()));
    }
    if let Some(position) = values.iter().position(|v| !v.is_finite()) {
        return Err(AnalyticsError::InvalidInput(format!(
            "{} contains a non-finite value at index {}",
            what, position
        )));
    }
    Ok(())
}

/// Reject paired samples of unequal length.
pub fn ensure_same_length(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(AnalyticsError::LengthMismatch { left, right });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite_rejects_empty() {
        let err = ensure_finite(&[], "sample").unwrap_err();
        assert_eq!(err, AnalyticsError::EmptyInput("sample".to_string()));
    }

    #[test]
    fn test_ensure_finite_rejects_nan() {
        let err = ensure_finite(&[1.0, f64::NAN], "sample").unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = ensure_same_length(3, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Length mismatch: left has 3 values, right has 4"
        );
    }
}
