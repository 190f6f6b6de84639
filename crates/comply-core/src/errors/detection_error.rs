//! Detection errors.

use super::error_code::{self, ComplyErrorCode};

/// Errors that can occur during PII detection, merging, and redaction.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    /// The hit set was produced against a different text than the one
    /// it is being applied to.
    #[error("Hit coordinates do not match the supplied text (expected digest {expected}, got {actual})")]
    CoordinateMismatch { expected: String, actual: String },

    #[error("Hit span {start}..{end} is invalid for text of {text_len} bytes")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        text_len: usize,
    },

    #[error("Hit spans {first_start}..{first_end} and {second_start}..{second_end} overlap")]
    OverlappingHits {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    #[error("Recognizer {recognizer} unavailable: {reason}")]
    RecognizerUnavailable { recognizer: String, reason: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl ComplyErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CoordinateMismatch { .. }
            | Self::SpanOutOfBounds { .. }
            | Self::OverlappingHits { .. } => error_code::COORDINATE_MISMATCH,
            Self::RecognizerUnavailable { .. } => error_code::RECOGNIZER_UNAVAILABLE,
            Self::InvalidPattern(_) => error_code::DETECTION_ERROR,
        }
    }
}
