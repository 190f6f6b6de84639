use crate::errors::StorageError;
use crate::models::{
    AuditRecord, CommitReceipt, CommitRequest, FinalCommit, PendingReview, ReviewStatus,
    SessionSummary, UpsertOutcome,
};

/// Append-only persistence for audit records and the review lifecycle.
pub trait LedgerStore: Send + Sync {
    /// Append records; duplicates by `record_id` are ignored. Returns the
    /// number of newly stored rows.
    fn append_audit_records(&self, records: &[AuditRecord]) -> Result<usize, StorageError>;

    /// Create or replace the pending row for `review.filepath`.
    fn upsert_pending_review(&self, review: &PendingReview) -> Result<UpsertOutcome, StorageError>;

    fn pending_reviews_by_status(&self, status: ReviewStatus) -> Result<Vec<PendingReview>, StorageError>;

    fn write_final_commit(&self, commit: &FinalCommit) -> Result<(), StorageError>;

    /// Append the per-document row of a batch run.
    fn write_session_summary(&self, summary: &SessionSummary) -> Result<(), StorageError>;

    /// Persist one document's records and optional pending row without
    /// interleaving with other documents' writes.
    fn record_document(
        &self,
        records: &[AuditRecord],
        review: Option<&PendingReview>,
    ) -> Result<Option<UpsertOutcome>, StorageError> {
        self.append_audit_records(records)?;
        review.map(|r| self.upsert_pending_review(r)).transpose()
    }
}

/// Approval interface consumed by a review front end.
pub trait ApprovalGate {
    /// Verify the presented hash and, on success, flip the row to APPROVED
    /// and write a `FinalCommit`. A storage failure is an `Err`, never an
    /// accepted receipt.
    fn commit(&self, request: &CommitRequest) -> Result<CommitReceipt, StorageError>;
}
