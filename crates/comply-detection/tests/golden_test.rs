//! Golden Tier-1 samples: scan, merge, redact.

use comply_core::models::{HitSet, MaskingMode};
use comply_detection::{merge, RedactionActuator, Tier1Scanner};
use test_fixtures::load_fixture_value;

#[test]
fn golden_tier1_samples() {
    let fixture = load_fixture_value("golden/detection/tier1_samples.json");
    let cases = fixture["cases"].as_array().unwrap();
    assert!(!cases.is_empty());

    let scanner = Tier1Scanner::new();
    let actuator = RedactionActuator::new(MaskingMode::Label);

    for case in cases {
        let text = case["text"].as_str().unwrap();
        let expected = case["redacted"].as_str().unwrap();

        let hits = HitSet::with_hits(text, scanner.scan(text));
        let outcome = merge(text, hits).unwrap();
        let redacted = actuator.redact(text, &outcome.resolved).unwrap();

        assert_eq!(redacted, expected, "input: {text}");
    }
}
