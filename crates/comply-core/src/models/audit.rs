//! Audit records and the fixed event registry.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint;

/// Event codes known to the ledger's `event_registry` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCode {
    LayoutAnalysis,
    RegexDetection,
    RecognizerDetection,
    RecognizerDegraded,
    ManualOverride,
    MergeConflict,
    Neutralization,
    ComplianceFlag,
    NoAction,
    Skipped,
    Failed,
}

impl EventCode {
    pub const ALL: [EventCode; 11] = [
        Self::LayoutAnalysis,
        Self::RegexDetection,
        Self::RecognizerDetection,
        Self::RecognizerDegraded,
        Self::ManualOverride,
        Self::MergeConflict,
        Self::Neutralization,
        Self::ComplianceFlag,
        Self::NoAction,
        Self::Skipped,
        Self::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LayoutAnalysis => "T0-ANL",
            Self::RegexDetection => "T1-RGX",
            Self::RecognizerDetection => "T2-NER",
            Self::RecognizerDegraded => "T2-DEG",
            Self::ManualOverride => "MN-OVR",
            Self::MergeConflict => "MRG-CFL",
            Self::Neutralization => "T3-GIP",
            Self::ComplianceFlag => "T3-FLG",
            Self::NoAction => "T3-NOP",
            Self::Skipped => "SYS-SKP",
            Self::Failed => "SYS-ERR",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    /// Registry row: (category, source tier, methodology, legal basis).
    pub fn registry_entry(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::LayoutAnalysis => ("System", "Tier 0", "Layout segmentation analysis", "System Integrity"),
            Self::RegexDetection => ("Privacy", "Tier 1", "Deterministic pattern matching", "GDPR / DSGVO"),
            Self::RecognizerDetection => ("Privacy", "Tier 2", "Statistical entity recognition", "GDPR / DSGVO"),
            Self::RecognizerDegraded => ("System", "Tier 2", "Recognizer unavailable, Tier 1 only", "System Integrity"),
            Self::ManualOverride => ("Privacy", "Manual", "Configured phrase override", "GDPR / DSGVO"),
            Self::MergeConflict => ("Privacy", "Merge", "Overlapping hit rejected", "GDPR / DSGVO"),
            Self::Neutralization => ("Inclusion", "Tier 3", "Linguistic gender neutralization", "AGG / EU AI Act"),
            Self::ComplianceFlag => ("Inclusion", "Tier 3", "Morphological gender flagging", "EU AI Act / D&I"),
            Self::NoAction => ("Inclusion", "Tier 3", "No neutralization required", "AGG / EU AI Act"),
            Self::Skipped => ("System", "Tier 0", "Unsupported input skipped", "System Integrity"),
            Self::Failed => ("System", "Tier 0", "Document processing failed", "System Integrity"),
        }
    }
}

impl std::fmt::Display for EventCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger timestamp format: RFC 3339, UTC, microsecond precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drop sub-microsecond precision so a value read back from the ledger
/// compares equal to the one written.
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_nanosecond(ts.nanosecond() / 1_000 * 1_000).unwrap_or(ts)
}

/// Immutable, hash-fingerprinted record of one pipeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub record_id: String,
    pub filepath: String,
    pub timestamp: DateTime<Utc>,
    pub event_code: EventCode,
    /// Fingerprint of the matched text, never the text itself.
    pub pii_fingerprint: Option<String>,
    pub confidence_score: f64,
    /// Human-readable context. Must not contain raw PII.
    pub description: String,
    pub integrity_hash: String,
}

impl AuditRecord {
    /// Create a record stamped now. `matched` is fingerprinted and discarded.
    pub fn new(
        filepath: &str,
        event_code: EventCode,
        matched: Option<&str>,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), filepath, event_code, matched, confidence, description)
    }

    /// Create a record with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        filepath: &str,
        event_code: EventCode,
        matched: Option<&str>,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        let timestamp = truncate_to_micros(timestamp);
        let pii_fingerprint = matched.map(fingerprint::pii_fingerprint);
        let integrity_hash = Self::compute_integrity_hash(
            &timestamp,
            filepath,
            pii_fingerprint.as_deref(),
            event_code,
        );
        Self {
            record_id: uuid::Uuid::new_v4().to_string(),
            filepath: filepath.to_string(),
            timestamp,
            event_code,
            pii_fingerprint,
            confidence_score: confidence.clamp(0.0, 1.0),
            description: description.into(),
            integrity_hash,
        }
    }

    /// `Hash(timestamp ∥ filepath ∥ piiFingerprint ∥ eventCode)`.
    pub fn compute_integrity_hash(
        timestamp: &DateTime<Utc>,
        filepath: &str,
        pii_fingerprint: Option<&str>,
        event_code: EventCode,
    ) -> String {
        fingerprint::hash_fields(&[
            &format_timestamp(timestamp),
            filepath,
            pii_fingerprint.unwrap_or(""),
            event_code.as_str(),
        ])
    }

    /// True when the stored integrity hash matches the record's fields.
    pub fn verify_integrity(&self) -> bool {
        self.integrity_hash
            == Self::compute_integrity_hash(
                &self.timestamp,
                &self.filepath,
                self.pii_fingerprint.as_deref(),
                self.event_code,
            )
    }
}
