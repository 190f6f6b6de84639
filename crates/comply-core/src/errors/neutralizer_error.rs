//! Neutralizer errors.

use super::error_code::{self, ComplyErrorCode};

/// Errors raised while neutralizing gendered language.
#[derive(Debug, thiserror::Error)]
pub enum NeutralizerError {
    #[error("Morphological analyzer {analyzer} failed: {reason}")]
    AnalyzerFailed { analyzer: String, reason: String },

    #[error("Invalid neutral term {original:?}: {reason}")]
    InvalidTerm { original: String, reason: String },

    #[error("Neutral term source unavailable: {reason}")]
    TermSourceUnavailable { reason: String },
}

impl ComplyErrorCode for NeutralizerError {
    fn error_code(&self) -> &'static str {
        error_code::NEUTRALIZER_ERROR
    }
}
