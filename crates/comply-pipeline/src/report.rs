//! Per-document results.

use serde::Serialize;

use comply_core::models::{DocumentScore, UpsertOutcome};

/// How a document left the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Processed,
    /// Not a document this pipeline accepts.
    Skipped { reason: String },
    /// Processing stopped; nothing but a failure record was written.
    Failed { error_code: String, message: String },
}

/// Outcome of one document run.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub filepath: String,
    pub status: DocumentStatus,
    /// Redacted and neutralized text. Only for processed documents.
    pub final_text: Option<String>,
    pub score: Option<DocumentScore>,
    pub pii_count: usize,
    pub conflict_count: usize,
    pub rewrite_count: usize,
    pub flag_count: usize,
    /// Tier-2 was unavailable and detection ran on Tier-1 and manual hits only.
    pub degraded: bool,
    #[serde(skip)]
    pub review: Option<UpsertOutcome>,
}

impl DocumentReport {
    pub(crate) fn skipped(filepath: &str, reason: impl Into<String>) -> Self {
        Self::empty(filepath, DocumentStatus::Skipped { reason: reason.into() })
    }

    pub(crate) fn failed(filepath: &str, error_code: &str, message: impl Into<String>) -> Self {
        Self::empty(
            filepath,
            DocumentStatus::Failed {
                error_code: error_code.to_string(),
                message: message.into(),
            },
        )
    }

    fn empty(filepath: &str, status: DocumentStatus) -> Self {
        Self {
            filepath: filepath.to_string(),
            status,
            final_text: None,
            score: None,
            pii_count: 0,
            conflict_count: 0,
            rewrite_count: 0,
            flag_count: 0,
            degraded: false,
            review: None,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.status == DocumentStatus::Processed
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, DocumentStatus::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, DocumentStatus::Failed { .. })
    }
}
