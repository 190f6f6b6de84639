//! Property tests over whole-document runs.

use std::path::Path;
use std::sync::Arc;

use comply_core::config::ComplyConfig;
use comply_core::fingerprint::content_hash;
use comply_core::models::AuditRecord;
use comply_core::traits::CancellationToken;
use comply_ledger::SqliteLedger;
use comply_pipeline::PipelineBuilder;
use proptest::prelude::*;
use test_fixtures::{InMemoryExtractor, StubMorphAnalyzer};

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-zäöü]{3,10}( [A-Za-zäöü]{3,10}){0,4}",
        "[a-z]{2,6}@[a-z]{2,6}\\.de".prop_map(|e| format!("E-Mail: {e}")),
        "[1-9][0-9]{4}".prop_map(|z| format!("Wohnort: {z} Berlin")),
        Just("Frau Bankkauffrau Müller".to_string()),
        Just("Industriekaufmann mit Erfahrung".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn processed_documents_are_consistent(lines in proptest::collection::vec(arb_line(), 1..6)) {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let extractor = InMemoryExtractor::new().with_text("cv.pdf", &refs);
        let ledger = Arc::new(SqliteLedger::open_in_memory().unwrap());
        let mut config = ComplyConfig::default();
        config.scoring.pass_threshold = Some(0.8);
        config.detection.recognizer_enabled = Some(false);
        config.pipeline.workers = Some(1);
        let pipeline = PipelineBuilder::new(config, Arc::new(extractor))
            .ledger(ledger.clone())
            .analyzer(Arc::new(StubMorphAnalyzer::german()))
            .build()
            .unwrap();

        let report = pipeline
            .process_document(Path::new("cv.pdf"), &CancellationToken::new())
            .unwrap();
        prop_assert!(report.is_processed());

        let final_text = report.final_text.unwrap();
        prop_assert!(!final_text.contains('@'));
        prop_assert!(!final_text.contains("kauffrau") && !final_text.contains("kaufmann"));

        let pending = ledger.pending_review("cv.pdf").unwrap().unwrap();
        prop_assert_eq!(&pending.final_content, &final_text);
        prop_assert_eq!(pending.content_integrity_hash, content_hash(&final_text));

        let records = ledger.audit_records_for("cv.pdf").unwrap();
        prop_assert!(records.iter().all(AuditRecord::verify_integrity));

        let score = report.score.unwrap();
        prop_assert!((0.0..=1.0).contains(&score.trust_score));
    }
}
