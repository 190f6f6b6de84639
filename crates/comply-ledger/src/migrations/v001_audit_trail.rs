//! V001: event_registry and the append-only audit_trail.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS event_registry (
    event_code TEXT PRIMARY KEY,
    category TEXT NOT NULL,
    source_tier TEXT NOT NULL,
    methodology TEXT NOT NULL,
    legal_basis TEXT NOT NULL
) STRICT;

-- seq preserves emission order; record_id makes appends idempotent.
CREATE TABLE IF NOT EXISTS audit_trail (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    record_id TEXT NOT NULL UNIQUE,
    filepath TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    event_code TEXT NOT NULL REFERENCES event_registry(event_code),
    pii_fingerprint TEXT,
    confidence_score REAL NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    integrity_hash TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audit_trail_filepath ON audit_trail(filepath);
CREATE INDEX IF NOT EXISTS idx_audit_trail_event ON audit_trail(event_code);
CREATE INDEX IF NOT EXISTS idx_audit_trail_fingerprint
    ON audit_trail(pii_fingerprint) WHERE pii_fingerprint IS NOT NULL;

CREATE TRIGGER IF NOT EXISTS audit_trail_no_update
BEFORE UPDATE ON audit_trail
BEGIN
    SELECT RAISE(ABORT, 'audit_trail is append-only');
END;

CREATE TRIGGER IF NOT EXISTS audit_trail_no_delete
BEFORE DELETE ON audit_trail
BEGIN
    SELECT RAISE(ABORT, 'audit_trail is append-only');
END;
"#;
