//! Property tests for trust scoring.

use comply_scoring::{ScoreInputs, TrustScorer};
use proptest::prelude::*;

fn conf() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn score(layout: f64, det: f64, neut: f64) -> f64 {
    TrustScorer::with_threshold(0.85, 0.5)
        .score(&ScoreInputs {
            layout_confidence: layout,
            detection_floor: Some(det),
            neutralization_floor: Some(neut),
            recognizer_degraded: false,
        })
        .trust_score
}

proptest! {
    #[test]
    fn lowering_layout_never_raises_trust(l in conf(), d in conf(), n in conf(), drop in conf()) {
        prop_assert!(score(l * drop, d, n) <= score(l, d, n));
    }

    #[test]
    fn lowering_detection_never_raises_trust(l in conf(), d in conf(), n in conf(), drop in conf()) {
        prop_assert!(score(l, d * drop, n) <= score(l, d, n));
    }

    #[test]
    fn lowering_neutralization_never_raises_trust(l in conf(), d in conf(), n in conf(), drop in conf()) {
        prop_assert!(score(l, d, n * drop) <= score(l, d, n));
    }

    #[test]
    fn trust_stays_in_unit_interval(l in conf(), d in conf(), n in conf()) {
        let t = score(l, d, n);
        prop_assert!((0.0..=1.0).contains(&t));
    }

    #[test]
    fn trust_is_at_least_the_weakest_stage(l in conf(), d in conf(), n in conf()) {
        let weakest = l.min(d).min(n);
        prop_assert!(score(l, d, n) >= weakest - 1e-12);
    }
}
