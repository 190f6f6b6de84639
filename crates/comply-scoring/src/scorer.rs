//! TrustScorer: weakest-link trust score and grade per document.
//!
//! `weakest = min(layout, detection_floor, neutralization_floor)`
//! `trust = 0.8 × weakest + 0.2 × detection_floor`
//!
//! A document with layout 0.95, one recognizer hit at 0.62, and only
//! pattern rewrites:
//! - weakest: 0.62
//! - trust: 0.8 × 0.62 + 0.2 × 0.62 = 0.62

use comply_core::config::{DetectionConfig, ScoringConfig};
use comply_core::errors::ConfigError;
use comply_core::models::{ComplianceGrade, DocumentScore};

/// Weight of the weakest stage.
const WEAKEST_WEIGHT: f64 = 0.8;
/// Weight of the detection floor on its own.
const DETECTION_WEIGHT: f64 = 0.2;

/// Per-document confidences collected by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// Mean page layout confidence.
    pub layout_confidence: f64,
    /// Lowest accepted hit confidence; `None` when nothing was detected.
    pub detection_floor: Option<f64>,
    /// Lowest Tier-3 event confidence; `None` when no event carries one.
    pub neutralization_floor: Option<f64>,
    /// The recognizer was unavailable for this document.
    pub recognizer_degraded: bool,
}

/// Computes `DocumentScore`s against a configured pass threshold.
#[derive(Debug, Clone)]
pub struct TrustScorer {
    pass_threshold: f64,
    degraded_cap: f64,
}

impl TrustScorer {
    /// Fails with `MissingValue` when `scoring.pass_threshold` is unset.
    pub fn new(scoring: &ScoringConfig, detection: &DetectionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            pass_threshold: scoring.require_pass_threshold()?,
            degraded_cap: detection.effective_degraded_confidence_cap(),
        })
    }

    pub fn with_threshold(pass_threshold: f64, degraded_cap: f64) -> Self {
        Self {
            pass_threshold,
            degraded_cap,
        }
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    /// Score one document. Missing floors count as 1.0; a degraded
    /// recognizer caps the detection floor.
    pub fn score(&self, inputs: &ScoreInputs) -> DocumentScore {
        let layout = unit(inputs.layout_confidence);
        let mut detection = unit(inputs.detection_floor.unwrap_or(1.0));
        if inputs.recognizer_degraded {
            detection = detection.min(self.degraded_cap);
        }
        let neutralization = unit(inputs.neutralization_floor.unwrap_or(1.0));

        let trust_score = Self::compute_trust(layout, detection, neutralization);
        let grade = if trust_score > self.pass_threshold {
            ComplianceGrade::Pass
        } else {
            ComplianceGrade::ReviewRequired
        };

        tracing::debug!(
            layout,
            detection,
            neutralization,
            trust_score,
            grade = grade.as_str(),
            "document scored"
        );

        DocumentScore {
            layout_confidence: layout,
            detection_confidence_floor: detection,
            neutralization_confidence_floor: neutralization,
            trust_score,
            grade,
        }
    }

    /// Trust from already-resolved stage confidences.
    pub fn compute_trust(layout: f64, detection_floor: f64, neutralization_floor: f64) -> f64 {
        let weakest = layout.min(detection_floor).min(neutralization_floor);
        (weakest * WEAKEST_WEIGHT + detection_floor * DETECTION_WEIGHT).clamp(0.0, 1.0)
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(layout: f64, det: Option<f64>, neut: Option<f64>) -> ScoreInputs {
        ScoreInputs {
            layout_confidence: layout,
            detection_floor: det,
            neutralization_floor: neut,
            recognizer_degraded: false,
        }
    }

    #[test]
    fn missing_threshold_is_an_error() {
        let err = TrustScorer::new(&ScoringConfig::default(), &DetectionConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { .. }));
    }

    #[test]
    fn clean_document_passes() {
        let scorer = TrustScorer::with_threshold(0.85, 0.5);
        let score = scorer.score(&inputs(1.0, None, None));
        assert_eq!(score.trust_score, 1.0);
        assert_eq!(score.grade, ComplianceGrade::Pass);
    }

    #[test]
    fn weak_layout_dominates() {
        let scorer = TrustScorer::with_threshold(0.85, 0.5);
        let score = scorer.score(&inputs(0.45, Some(1.0), Some(0.75)));
        // 0.8 * 0.45 + 0.2 * 1.0
        assert!((score.trust_score - 0.56).abs() < 1e-12);
        assert_eq!(score.grade, ComplianceGrade::ReviewRequired);
    }

    #[test]
    fn threshold_is_exclusive() {
        let scorer = TrustScorer::with_threshold(0.75, 0.5);
        let score = scorer.score(&inputs(1.0, Some(1.0), Some(0.75)));
        // 0.8 * 0.75 + 0.2 = 0.8
        assert_eq!(score.grade, ComplianceGrade::Pass);
        let edge = TrustScorer::with_threshold(score.trust_score, 0.5).score(&inputs(1.0, Some(1.0), Some(0.75)));
        assert_eq!(edge.grade, ComplianceGrade::ReviewRequired);
    }

    #[test]
    fn degraded_recognizer_caps_detection() {
        let scorer = TrustScorer::with_threshold(0.6, 0.5);
        let mut i = inputs(1.0, None, None);
        i.recognizer_degraded = true;
        let score = scorer.score(&i);
        assert_eq!(score.detection_confidence_floor, 0.5);
        assert!((score.trust_score - 0.5).abs() < 1e-12);
        assert_eq!(score.grade, ComplianceGrade::ReviewRequired);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let scorer = TrustScorer::with_threshold(0.5, 0.5);
        let score = scorer.score(&inputs(f64::NAN, Some(2.0), Some(-1.0)));
        assert_eq!(score.layout_confidence, 0.0);
        assert_eq!(score.detection_confidence_floor, 1.0);
        assert_eq!(score.neutralization_confidence_floor, 0.0);
    }
}
