//! V003: neutral_terms reference table and session_summary.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS neutral_terms (
    original TEXT PRIMARY KEY,
    neutral TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT '',
    last_updated TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS session_summary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    file_name TEXT NOT NULL,
    pii_count INTEGER NOT NULL,
    neutralization_count INTEGER NOT NULL,
    trust_score REAL NOT NULL,
    compliance_grade TEXT NOT NULL CHECK (compliance_grade IN ('PASS', 'REVIEW_REQUIRED')),
    processed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_session_summary_session ON session_summary(session_id);
"#;
