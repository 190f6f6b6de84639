//! Structured log events for key pipeline operations.
//!
//! Fields carry labels, counts, offsets, and fingerprints only. Matched text
//! is never logged.

/// Log a document skipped for unsupported input.
pub fn document_skipped(filepath: &str, reason: &str) {
    tracing::info!(
        event = "document_skipped",
        filepath = %filepath,
        reason = %reason,
        "document skipped"
    );
}

/// Log a document that failed processing.
pub fn document_failed(filepath: &str, error_code: &str, message: &str) {
    tracing::warn!(
        event = "document_failed",
        filepath = %filepath,
        error_code = %error_code,
        message = %message,
        "document failed"
    );
}

/// Log a completed document.
pub fn document_processed(filepath: &str, hits: usize, rewrites: usize, trust_score: f64, grade: &str) {
    tracing::info!(
        event = "document_processed",
        filepath = %filepath,
        hits = hits,
        rewrites = rewrites,
        trust_score = trust_score,
        grade = %grade,
        "document processed"
    );
}

/// Log a recognizer degradation.
pub fn recognizer_degraded(recognizer: &str, failure: &str, confidence_cap: f64) {
    tracing::warn!(
        event = "recognizer_degraded",
        recognizer = %recognizer,
        failure = %failure,
        confidence_cap = confidence_cap,
        fallback = "tier1_only",
        "recognizer degraded"
    );
}

/// Log a merge conflict.
pub fn merge_conflict(loser_label: &str, loser_source: &str, start: usize, end: usize, winner_label: &str) {
    tracing::debug!(
        event = "merge_conflict",
        loser_label = %loser_label,
        loser_source = %loser_source,
        start = start,
        end = end,
        winner_label = %winner_label,
        "merge conflict resolved"
    );
}

/// Log an approval decision.
pub fn approval_decided(filepath: &str, accepted: bool, reason: Option<&str>) {
    tracing::info!(
        event = "approval_decided",
        filepath = %filepath,
        accepted = accepted,
        reason = ?reason,
        "approval decided"
    );
}

/// Log a transient ledger failure that will be retried.
pub fn ledger_retry(operation: &str, attempt: u32, message: &str) {
    tracing::warn!(
        event = "ledger_retry",
        operation = %operation,
        attempt = attempt,
        message = %message,
        "ledger busy, retrying"
    );
}

/// Log a finished batch.
pub fn batch_completed(session_id: &str, processed: usize, skipped: usize, failed: usize) {
    tracing::info!(
        event = "batch_completed",
        session_id = %session_id,
        processed = processed,
        skipped = skipped,
        failed = failed,
        "batch completed"
    );
}
