//! Document extraction errors.

use super::error_code::{self, ComplyErrorCode};

/// Errors raised by a [`DocumentExtractor`](crate::traits::DocumentExtractor).
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Cannot open document {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Document {path} is malformed: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Document {path} is encrypted")]
    Encrypted { path: String },
}

impl ComplyErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACTION_FAILED
    }
}
