//! Golden documents through the whole pipeline.

use std::path::Path;
use std::sync::Arc;

use comply_core::config::ComplyConfig;
use comply_core::traits::CancellationToken;
use comply_ledger::SqliteLedger;
use comply_pipeline::PipelineBuilder;
use test_fixtures::{load_fixture_value, InMemoryExtractor, StubMorphAnalyzer};

#[test]
fn golden_documents() {
    let fixture = load_fixture_value("golden/pipeline/documents.json");
    let cases = fixture["cases"].as_array().unwrap();
    assert!(!cases.is_empty());

    for (idx, case) in cases.iter().enumerate() {
        let lines: Vec<&str> = case["lines"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap())
            .collect();
        let path = format!("doc-{idx}.pdf");
        let extractor = InMemoryExtractor::new().with_text(path.as_str(), &lines);

        let mut config = ComplyConfig::default();
        config.scoring.pass_threshold = Some(0.8);
        config.detection.recognizer_enabled = Some(false);
        config.pipeline.workers = Some(1);
        let pipeline = PipelineBuilder::new(config, Arc::new(extractor))
            .ledger(Arc::new(SqliteLedger::open_in_memory().unwrap()))
            .analyzer(Arc::new(StubMorphAnalyzer::german()))
            .build()
            .unwrap();

        let report = pipeline
            .process_document(Path::new(&path), &CancellationToken::new())
            .unwrap();

        assert_eq!(
            report.final_text.as_deref(),
            case["final_text"].as_str(),
            "case {idx}: {lines:?}"
        );
        assert_eq!(report.pii_count as u64, case["pii_count"].as_u64().unwrap(), "case {idx}");
        assert_eq!(report.rewrite_count as u64, case["rewrite_count"].as_u64().unwrap(), "case {idx}");
        assert_eq!(report.flag_count as u64, case["flag_count"].as_u64().unwrap(), "case {idx}");
    }
}
