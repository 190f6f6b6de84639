//! Pipeline errors.

use super::error_code::{self, ComplyErrorCode};
use super::{ConfigError, DetectionError, ExtractionError, NeutralizerError, StorageError};

/// Errors that can occur while processing a document.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Neutralizer error: {0}")]
    Neutralizer(#[from] NeutralizerError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unsupported input {path}: {reason}")]
    InputFormat { path: String, reason: String },

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Ledger and configuration failures abort a batch. Everything else is
    /// contained to the document that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Config(_))
    }
}

impl ComplyErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Extraction(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
            Self::Neutralizer(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::InputFormat { .. } => error_code::INPUT_FORMAT,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
