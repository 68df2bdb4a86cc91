//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Document extraction error: {0}")]
    DocumentExtraction(String),

    #[error("Embedding model unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Embedding computation failed: {0}")]
    EmbeddingCompute(String),

    #[error("Embedding dimensions don't match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[source] Box<MatcherError>),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl MatcherError {
    /// Wrap a pipeline failure, keeping an existing wrapper as-is
    pub fn analysis_failed(cause: MatcherError) -> Self {
        match cause {
            MatcherError::AnalysisFailed(_) => cause,
            other => MatcherError::AnalysisFailed(Box::new(other)),
        }
    }

    /// The underlying failure behind an `AnalysisFailed` wrapper
    pub fn root_cause(&self) -> &MatcherError {
        match self {
            MatcherError::AnalysisFailed(inner) => inner.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_analysis_failed_preserves_source() {
        let err = MatcherError::analysis_failed(MatcherError::DimensionMismatch { left: 2, right: 3 });

        assert!(err.to_string().starts_with("Analysis failed"));
        assert!(err.source().is_some());
        assert!(matches!(err.root_cause(), MatcherError::DimensionMismatch { left: 2, right: 3 }));
    }

    #[test]
    fn test_analysis_failed_is_not_double_wrapped() {
        let inner = MatcherError::analysis_failed(MatcherError::EmbeddingUnavailable("offline".to_string()));
        let outer = MatcherError::analysis_failed(inner);

        match outer {
            MatcherError::AnalysisFailed(cause) => {
                assert!(matches!(*cause, MatcherError::EmbeddingUnavailable(_)));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
