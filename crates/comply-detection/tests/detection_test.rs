//! Detection flow across sources: manual, Tier-1, recognizer.

use comply_core::config::DetectionConfig;
use comply_core::errors::DetectionError;
use comply_core::models::{HitSet, HitSource, MaskingMode};
use comply_detection::{merge, ManualOverrides, RecognizerAdapter, RecognizerPool, RedactionActuator, Tier1Scanner};
use test_fixtures::StubRecognizer;

fn collect(text: &str, manual: &ManualOverrides, rec: Option<&RecognizerPool>) -> HitSet {
    let mut set = HitSet::with_hits(text, manual.scan(text));
    for hit in Tier1Scanner::new().scan(text) {
        set.push(hit);
    }
    if let Some(pool) = rec {
        let adapter = RecognizerAdapter::from_config(&DetectionConfig::default());
        let hits = pool.with_recognizer(|r| adapter.detect(r, text)).unwrap();
        for hit in hits {
            set.push(hit);
        }
    }
    set
}

#[test]
fn recognizer_and_patterns_combine() {
    let text = "Frau Anna Schmidt, Hauptstraße 5, 10115 Berlin, anna@example.de";
    let rec = StubRecognizer::new()
        .entity("Anna Schmidt", "PER", 0.93)
        .rule_entity("Hauptstraße 5", "LOC_STR", "street")
        .entity("Berlin", "LOC", 0.88)
        .entity("anna", "PER", 0.4);
    let pool = RecognizerPool::new(vec![Box::new(rec)]).unwrap();

    let set = collect(text, &ManualOverrides::default(), Some(&pool));
    let outcome = merge(text, set).unwrap();
    let out = RedactionActuator::new(MaskingMode::Label)
        .redact(text, &outcome.resolved)
        .unwrap();

    assert_eq!(out, "Frau [PER], [LOC_STR], [LOC] [LOC], [EMAIL]");
    // "anna" inside the email loses to the longer EMAIL span.
    assert!(outcome
        .conflicts
        .iter()
        .any(|c| c.loser.label == "PER" && c.winner_label == "EMAIL"));
    assert_eq!(outcome.resolved.min_confidence(), Some(0.88));
}

#[test]
fn manual_override_wins_identical_span() {
    let text = "Referenz: 12345";
    let manual = ManualOverrides::new(vec![("12345".into(), "CUSTOMER_ID".into())]);
    let outcome = merge(text, collect(text, &manual, None)).unwrap();
    let hit = &outcome.resolved.hits()[0];
    assert_eq!(hit.label, "CUSTOMER_ID");
    assert_eq!(hit.source, HitSource::Manual);
}

#[test]
fn unavailable_recognizer_surfaces_as_error() {
    let pool = RecognizerPool::new(vec![Box::new(StubRecognizer::failing("offline"))]).unwrap();
    let adapter = RecognizerAdapter::from_config(&DetectionConfig::default());
    let err = pool
        .with_recognizer(|r| adapter.detect(r, "Frau Müller"))
        .unwrap_err();
    assert!(matches!(err, DetectionError::RecognizerUnavailable { .. }));
}

#[test]
fn star_mode_keeps_length() {
    let text = "Mail: a@b.de";
    let outcome = merge(text, collect(text, &ManualOverrides::default(), None)).unwrap();
    let out = RedactionActuator::new(MaskingMode::Star)
        .redact(text, &outcome.resolved)
        .unwrap();
    assert_eq!(out, "Mail: ******");
}

#[test]
fn redacting_other_text_is_rejected() {
    let text = "a@b.de";
    let outcome = merge(text, collect(text, &ManualOverrides::default(), None)).unwrap();
    let err = RedactionActuator::default()
        .redact("x@y.de", &outcome.resolved)
        .unwrap_err();
    assert!(matches!(err, DetectionError::CoordinateMismatch { .. }));
}

#[test]
fn web_address_ending_a_sentence_is_redacted() {
    let text = "Projekte: example.de/portfolio. Danke";
    let outcome = merge(text, collect(text, &ManualOverrides::default(), None)).unwrap();
    let out = RedactionActuator::new(MaskingMode::Label)
        .redact(text, &outcome.resolved)
        .unwrap();
    assert_eq!(out, "Projekte: [WEB]. Danke");
}
