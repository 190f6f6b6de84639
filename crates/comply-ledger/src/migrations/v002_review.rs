//! V002: pending_review and final_commit.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS pending_review (
    filepath TEXT PRIMARY KEY,
    original_content TEXT NOT NULL,
    final_content TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'PENDING' CHECK (status IN ('PENDING', 'APPROVED')),
    content_integrity_hash TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_pending_review_status ON pending_review(status);

CREATE TABLE IF NOT EXISTS final_commit (
    filepath TEXT PRIMARY KEY REFERENCES pending_review(filepath),
    content_sanitized TEXT NOT NULL,
    approver_id TEXT NOT NULL,
    approval_timestamp TEXT NOT NULL,
    certificate_hash TEXT NOT NULL
) STRICT;

CREATE TRIGGER IF NOT EXISTS final_commit_no_update
BEFORE UPDATE ON final_commit
BEGIN
    SELECT RAISE(ABORT, 'final_commit is immutable');
END;

CREATE TRIGGER IF NOT EXISTS final_commit_no_delete
BEFORE DELETE ON final_commit
BEGIN
    SELECT RAISE(ABORT, 'final_commit is immutable');
END;
"#;
