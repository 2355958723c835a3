use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a scoring stage can hit.
///
/// None of these escape `ScoringEngine`: each one is logged, mapped to a zero
/// contribution and reported back to the caller as a [`ScoringIssue`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Document unreadable: no text could be extracted from '{0}'")]
    DocumentUnreadable(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Startup configuration errors. Unlike [`ScoringError`] these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid status thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Invalid {name} pattern: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Embedding model name cannot be empty")]
    MissingModelName,

    #[error("Failed to read keyword lexicon '{path}': {source}")]
    LexiconIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode keyword lexicon: {0}")]
    LexiconFormat(#[from] serde_json::Error),
}

/// Machine-readable code carried by a [`ScoringIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    DocumentUnreadable,
    ModelUnavailable,
    EmptyInput,
}

/// Error marker attached to a degraded analysis so the caller can tell an
/// honest zero from a failed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringIssue {
    pub code: IssueCode,
    pub message: String,
}

impl From<&ScoringError> for ScoringIssue {
    fn from(error: &ScoringError) -> Self {
        let code = match error {
            ScoringError::DocumentUnreadable(_) => IssueCode::DocumentUnreadable,
            ScoringError::ModelUnavailable(_) => IssueCode::ModelUnavailable,
            ScoringError::EmptyInput(_) => IssueCode::EmptyInput,
        };
        ScoringIssue {
            code,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_code_serializes_snake_case() {
        let json = serde_json::to_string(&IssueCode::ModelUnavailable).unwrap();
        assert_eq!(json, r#""model_unavailable""#);
    }

    #[test]
    fn test_issue_from_error_keeps_message() {
        let error = ScoringError::DocumentUnreadable("cv.pdf".to_string());
        let issue = ScoringIssue::from(&error);
        assert_eq!(issue.code, IssueCode::DocumentUnreadable);
        assert!(issue.message.contains("cv.pdf"));
    }
}
