//! Property tests for fingerprints and audit-record hashing.

use chrono::{TimeZone, Utc};
use comply_core::fingerprint::{content_hash, pii_fingerprint};
use comply_core::models::{AuditRecord, EventCode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fingerprint_ignores_surrounding_whitespace(
        value in "[A-Za-zäöüß@.0-9]{1,24}",
        left in "[ \t\n]{0,3}",
        right in "[ \t\n]{0,3}",
    ) {
        let padded = format!("{left}{value}{right}");
        prop_assert_eq!(pii_fingerprint(&padded), pii_fingerprint(&value));
    }

    #[test]
    fn fingerprint_never_contains_the_value(value in "[A-Za-z]{8,24}") {
        let fp = pii_fingerprint(&value);
        prop_assert_eq!(fp.len(), 64);
        prop_assert!(!fp.contains(&value.to_ascii_lowercase()));
    }

    #[test]
    fn content_hash_is_exact(a in ".{0,40}", b in ".{0,40}") {
        prop_assert_eq!(content_hash(&a) == content_hash(&b), a == b);
    }

    #[test]
    fn integrity_hash_tracks_every_field(secs in 0i64..4_000_000_000, micros in 0u32..1_000_000) {
        let ts = Utc.timestamp_opt(secs, micros * 1_000).unwrap();
        let record = AuditRecord::at(ts, "cv.pdf", EventCode::RegexDetection, Some("a@b.de"), 1.0, "EMAIL");
        prop_assert!(record.verify_integrity());

        let mut moved = record.clone();
        moved.filepath = "other.pdf".to_string();
        prop_assert!(!moved.verify_integrity());

        let mut recoded = record.clone();
        recoded.event_code = EventCode::ManualOverride;
        prop_assert!(!recoded.verify_integrity());

        let mut shifted = record;
        shifted.timestamp += chrono::Duration::microseconds(1);
        prop_assert!(!shifted.verify_integrity());
    }
}
