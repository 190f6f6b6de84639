//! Property tests for the audit trail.

use comply_core::models::{AuditRecord, EventCode};
use comply_core::traits::LedgerStore;
use comply_ledger::SqliteLedger;
use proptest::prelude::*;

fn arb_event_code() -> impl Strategy<Value = EventCode> {
    proptest::sample::select(EventCode::ALL.to_vec())
}

fn arb_record() -> impl Strategy<Value = AuditRecord> {
    (
        "[a-z]{1,8}\\.pdf",
        arb_event_code(),
        proptest::option::of("[A-Za-zäöüß@. 0-9]{1,20}"),
        0.0f64..=1.0,
    )
        .prop_map(|(filepath, code, matched, confidence)| {
            AuditRecord::new(&filepath, code, matched.as_deref(), confidence, code.as_str())
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reappending_inserts_nothing(records in proptest::collection::vec(arb_record(), 0..20)) {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        let first = ledger.append_audit_records(&records).unwrap();
        prop_assert_eq!(first, records.len());
        prop_assert_eq!(ledger.append_audit_records(&records).unwrap(), 0);
    }

    #[test]
    fn stored_records_verify(records in proptest::collection::vec(arb_record(), 1..20)) {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.append_audit_records(&records).unwrap();

        for record in &records {
            let stored = ledger.audit_records_for(&record.filepath).unwrap();
            let found = stored.iter().find(|r| r.record_id == record.record_id).unwrap();
            prop_assert!(found.verify_integrity());
            prop_assert_eq!(found, record);
            prop_assert!(ledger.verify_audit_chain(&record.filepath).unwrap().is_empty());
        }
    }
}
