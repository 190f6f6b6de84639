//! Property tests for merging and redaction.

use comply_core::models::{Hit, HitSet, HitSource, MaskingMode};
use comply_detection::{merge, RedactionActuator};
use proptest::prelude::*;

const TEXT_LEN: usize = 200;

fn text() -> String {
    "abcdefghij".repeat(TEXT_LEN / 10)
}

fn arb_hits() -> impl Strategy<Value = Vec<Hit>> {
    prop::collection::vec((0usize..TEXT_LEN, 1usize..40, 0usize..3), 0..40).prop_map(|spans| {
        spans
            .into_iter()
            .map(|(start, len, label)| {
                let end = (start + len).min(TEXT_LEN);
                let start = start.min(end - 1);
                Hit::new(start, end, ["PER", "LOC", "EMAIL"][label], HitSource::Regex, 1.0)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn merged_hits_never_overlap(hits in arb_hits()) {
        let text = text();
        let outcome = merge(&text, HitSet::with_hits(&text, hits)).unwrap();
        for pair in outcome.resolved.hits().windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn every_input_hit_is_accepted_or_recorded(hits in arb_hits()) {
        let text = text();
        let total = hits.len();
        let outcome = merge(&text, HitSet::with_hits(&text, hits)).unwrap();
        prop_assert_eq!(outcome.resolved.len() + outcome.conflicts.len(), total);
    }

    #[test]
    fn longest_hit_wins_per_start(hits in arb_hits()) {
        let text = text();
        let outcome = merge(&text, HitSet::with_hits(&text, hits.clone())).unwrap();
        for accepted in outcome.resolved.hits() {
            let longest = hits
                .iter()
                .filter(|h| h.start == accepted.start)
                .map(|h| h.end)
                .max()
                .unwrap();
            prop_assert_eq!(accepted.end, longest);
        }
    }

    #[test]
    fn star_redaction_preserves_length(hits in arb_hits()) {
        let text = text();
        let outcome = merge(&text, HitSet::with_hits(&text, hits)).unwrap();
        let out = RedactionActuator::new(MaskingMode::Star)
            .redact(&text, &outcome.resolved)
            .unwrap();
        prop_assert_eq!(out.chars().count(), text.chars().count());
    }

    #[test]
    fn label_redaction_keeps_unmasked_text(hits in arb_hits()) {
        let text = text();
        let outcome = merge(&text, HitSet::with_hits(&text, hits)).unwrap();
        let out = RedactionActuator::new(MaskingMode::Label)
            .redact(&text, &outcome.resolved)
            .unwrap();
        let mut cursor = 0;
        let mut expected = String::new();
        for hit in outcome.resolved.hits() {
            expected.push_str(&text[cursor..hit.start]);
            expected.push_str(&format!("[{}]", hit.label));
            cursor = hit.end;
        }
        expected.push_str(&text[cursor..]);
        prop_assert_eq!(out, expected);
    }
}
