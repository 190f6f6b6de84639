//! SqliteLedger: the ledger store, approval gate, and term source over SQLite.

use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use comply_core::config::LedgerConfig;
use comply_core::errors::{NeutralizerError, StorageError};
use comply_core::fingerprint::content_hash;
use comply_core::models::{
    AuditRecord, CommitReceipt, CommitRejection, CommitRequest, FinalCommit, NeutralTerm,
    PendingReview, ReviewStatus, SessionSummary, UpsertOutcome,
};
use comply_core::tracing_setup::events;
use comply_core::traits::{ApprovalGate, LedgerStore, NeutralTermSource};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::LedgerDatabase;
use crate::queries::{audit_trail, final_commit, neutral_terms, pending_review, session_summary};

/// SQLite-backed ledger.
pub struct SqliteLedger {
    db: LedgerDatabase,
    append_retries: u32,
    retry_backoff: Duration,
}

impl SqliteLedger {
    /// Open (and migrate) the database named by `config`.
    pub fn open(config: &LedgerConfig) -> Result<Self, StorageError> {
        Self::open_at(Path::new(config.effective_db_path()), config)
    }

    /// Open a database at an explicit path with `config`'s retry settings.
    pub fn open_at(path: &Path, config: &LedgerConfig) -> Result<Self, StorageError> {
        let db = LedgerDatabase::open(path, config.effective_busy_timeout_ms())?;
        Ok(Self::with_database(db, config))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::with_database(
            LedgerDatabase::open_in_memory()?,
            &LedgerConfig::default(),
        ))
    }

    fn with_database(db: LedgerDatabase, config: &LedgerConfig) -> Self {
        Self {
            db,
            append_retries: config.effective_append_retries(),
            retry_backoff: Duration::from_millis(config.effective_retry_backoff_ms()),
        }
    }

    pub fn database(&self) -> &LedgerDatabase {
        &self.db
    }

    /// Run an idempotent write, retrying on busy/locked.
    fn with_retry<F, T>(&self, operation: &str, mut f: F) -> Result<T, StorageError>
    where
        F: FnMut() -> Result<T, StorageError>,
    {
        let mut attempt = 0;
        loop {
            match f() {
                Err(e) if e.is_transient() && attempt < self.append_retries => {
                    attempt += 1;
                    events::ledger_retry(operation, attempt, &e.to_string());
                    thread::sleep(self.retry_backoff * attempt);
                }
                other => return other,
            }
        }
    }

    /// Records for one document, in emission order.
    pub fn audit_records_for(&self, filepath: &str) -> Result<Vec<AuditRecord>, StorageError> {
        self.db
            .with_reader(|conn| audit_trail::query_by_filepath(conn, filepath))
    }

    /// Records across documents sharing a PII fingerprint.
    pub fn audit_records_with_fingerprint(&self, fingerprint: &str) -> Result<Vec<AuditRecord>, StorageError> {
        self.db
            .with_reader(|conn| audit_trail::query_by_fingerprint(conn, fingerprint))
    }

    /// Ids of stored records whose integrity hash no longer matches.
    pub fn verify_audit_chain(&self, filepath: &str) -> Result<Vec<String>, StorageError> {
        self.db
            .with_reader(|conn| audit_trail::find_tampered(conn, filepath))
    }

    pub fn pending_review(&self, filepath: &str) -> Result<Option<PendingReview>, StorageError> {
        self.db.with_reader(|conn| pending_review::get(conn, filepath))
    }

    pub fn final_commit(&self, filepath: &str) -> Result<Option<FinalCommit>, StorageError> {
        self.db.with_reader(|conn| final_commit::get(conn, filepath))
    }

    pub fn session_summaries(&self, session_id: &str) -> Result<Vec<SessionSummary>, StorageError> {
        self.db
            .with_reader(|conn| session_summary::query_by_session(conn, session_id))
    }

    /// Upsert reference terms. Returns rows written.
    pub fn seed_neutral_terms(&self, terms: &[NeutralTerm]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| neutral_terms::upsert_terms(tx, terms))
        })
    }

    /// Parse a comma-separated seed list and upsert it.
    pub fn seed_neutral_terms_from_str(&self, seed: &str) -> Result<usize, StorageError> {
        let terms = neutral_terms::parse_seed(seed)?;
        self.seed_neutral_terms(&terms)
    }

    fn decide(
        tx: &rusqlite::Transaction<'_>,
        request: &CommitRequest,
    ) -> Result<CommitReceipt, StorageError> {
        let Some(row) = pending_review::get(tx, &request.filepath)? else {
            return Ok(CommitReceipt::rejected(CommitRejection::UnknownDocument));
        };
        if row.status == ReviewStatus::Approved {
            return Ok(CommitReceipt::rejected(CommitRejection::AlreadyApproved));
        }
        if request.presented_hash != row.content_integrity_hash {
            return Ok(CommitReceipt::rejected(CommitRejection::HashMismatch));
        }
        if content_hash(&request.final_text) != row.content_integrity_hash {
            return Ok(CommitReceipt::rejected(CommitRejection::ContentMismatch));
        }

        if !pending_review::mark_approved(tx, &request.filepath)? {
            return Ok(CommitReceipt::rejected(CommitRejection::AlreadyApproved));
        }
        let commit = FinalCommit::new(
            &request.filepath,
            &request.final_text,
            &request.approver_id,
            Utc::now(),
        );
        final_commit::insert(tx, &commit)?;
        Ok(CommitReceipt::accepted(commit.certificate_hash))
    }
}

impl LedgerStore for SqliteLedger {
    fn append_audit_records(&self, records: &[AuditRecord]) -> Result<usize, StorageError> {
        self.with_retry("append_audit_records", || {
            self.db.with_writer(|conn| {
                with_immediate_transaction(conn, |tx| audit_trail::insert_records(tx, records))
            })
        })
    }

    fn upsert_pending_review(&self, review: &PendingReview) -> Result<UpsertOutcome, StorageError> {
        self.with_retry("upsert_pending_review", || {
            self.db.with_writer(|conn| {
                with_immediate_transaction(conn, |tx| pending_review::upsert(tx, review))
            })
        })
    }

    fn pending_reviews_by_status(&self, status: ReviewStatus) -> Result<Vec<PendingReview>, StorageError> {
        self.db
            .with_reader(|conn| pending_review::list_by_status(conn, status))
    }

    fn write_final_commit(&self, commit: &FinalCommit) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| final_commit::insert(tx, commit))
        })
    }

    fn write_session_summary(&self, summary: &SessionSummary) -> Result<(), StorageError> {
        self.with_retry("write_session_summary", || {
            self.db.with_writer(|conn| session_summary::insert(conn, summary))
        })
    }

    /// One IMMEDIATE transaction per document. Safe to retry: appends ignore
    /// known record ids and the upsert is idempotent.
    fn record_document(
        &self,
        records: &[AuditRecord],
        review: Option<&PendingReview>,
    ) -> Result<Option<UpsertOutcome>, StorageError> {
        self.with_retry("record_document", || {
            self.db.with_writer(|conn| {
                with_immediate_transaction(conn, |tx| {
                    audit_trail::insert_records(tx, records)?;
                    review.map(|r| pending_review::upsert(tx, r)).transpose()
                })
            })
        })
    }
}

impl ApprovalGate for SqliteLedger {
    fn commit(&self, request: &CommitRequest) -> Result<CommitReceipt, StorageError> {
        let _span = comply_core::approval_span!(request.filepath.as_str()).entered();
        let receipt = self
            .db
            .with_writer(|conn| with_immediate_transaction(conn, |tx| Self::decide(tx, request)));

        match &receipt {
            Ok(r) => events::approval_decided(
                &request.filepath,
                r.accepted,
                r.reason.map(|reason| reason.as_str()),
            ),
            Err(e) => tracing::error!(
                filepath = %request.filepath,
                error = %e,
                "approval could not be recorded"
            ),
        }
        receipt
    }
}

impl NeutralTermSource for SqliteLedger {
    fn load_neutral_terms(&self) -> Result<Vec<NeutralTerm>, NeutralizerError> {
        self.db
            .with_reader(neutral_terms::load_all)
            .map_err(|e| NeutralizerError::TermSourceUnavailable {
                reason: e.to_string(),
            })
    }
}
