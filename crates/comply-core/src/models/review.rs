//! Pending-review lifecycle and approval receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::{format_timestamp, truncate_to_micros};
use crate::fingerprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            _ => None,
        }
    }
}

/// A processed document awaiting human approval, keyed by filepath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReview {
    pub filepath: String,
    pub original_content: String,
    pub final_content: String,
    pub status: ReviewStatus,
    /// `Hash(final_content)`.
    pub content_integrity_hash: String,
}

impl PendingReview {
    pub fn new(
        filepath: impl Into<String>,
        original_content: impl Into<String>,
        final_content: impl Into<String>,
    ) -> Self {
        let final_content = final_content.into();
        Self {
            filepath: filepath.into(),
            original_content: original_content.into(),
            content_integrity_hash: fingerprint::content_hash(&final_content),
            final_content,
            status: ReviewStatus::Pending,
        }
    }
}

/// Result of create-or-update on a pending-review row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    /// The row is already approved and was left untouched.
    Locked,
}

/// Immutable record written when a document is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalCommit {
    pub filepath: String,
    pub content_sanitized: String,
    pub approver_id: String,
    pub approval_timestamp: DateTime<Utc>,
    pub certificate_hash: String,
}

impl FinalCommit {
    pub fn new(
        filepath: &str,
        content_sanitized: &str,
        approver_id: &str,
        approval_timestamp: DateTime<Utc>,
    ) -> Self {
        let approval_timestamp = truncate_to_micros(approval_timestamp);
        let certificate_hash =
            Self::compute_certificate_hash(filepath, content_sanitized, approver_id, &approval_timestamp);
        Self {
            filepath: filepath.to_string(),
            content_sanitized: content_sanitized.to_string(),
            approver_id: approver_id.to_string(),
            approval_timestamp,
            certificate_hash,
        }
    }

    pub fn compute_certificate_hash(
        filepath: &str,
        content_sanitized: &str,
        approver_id: &str,
        approval_timestamp: &DateTime<Utc>,
    ) -> String {
        fingerprint::hash_fields(&[
            filepath,
            &fingerprint::content_hash(content_sanitized),
            approver_id,
            &format_timestamp(approval_timestamp),
        ])
    }
}

/// Approval request as presented by a review front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub filepath: String,
    pub final_text: String,
    pub presented_hash: String,
    pub approver_id: String,
}

/// Why an approval was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitRejection {
    UnknownDocument,
    AlreadyApproved,
    /// Presented hash differs from the stored content hash.
    HashMismatch,
    /// Presented hash does not match the text being committed.
    ContentMismatch,
}

impl CommitRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownDocument => "unknown_document",
            Self::AlreadyApproved => "already_approved",
            Self::HashMismatch => "hash_mismatch",
            Self::ContentMismatch => "content_mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub accepted: bool,
    pub reason: Option<CommitRejection>,
    pub certificate_hash: Option<String>,
}

impl CommitReceipt {
    pub fn accepted(certificate_hash: String) -> Self {
        Self {
            accepted: true,
            reason: None,
            certificate_hash: Some(certificate_hash),
        }
    }

    pub fn rejected(reason: CommitRejection) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            certificate_hash: None,
        }
    }
}
