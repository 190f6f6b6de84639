//! Tier-2 recognizer adaptation.
//!
//! Turns whatever a statistical recognizer reports into allow-listed hits
//! with a calibrated confidence.

mod pool;

pub use pool::RecognizerPool;

use std::collections::HashMap;

use comply_core::config::DetectionConfig;
use comply_core::constants::CONFIDENCE_DECIMALS;
use comply_core::errors::DetectionError;
use comply_core::models::{validate_span, Hit, HitSource};
use comply_core::traits::{EntityRecognizer, RecognizedEntity, SpanKey};

/// Filters and scores recognizer output.
#[derive(Debug, Clone)]
pub struct RecognizerAdapter {
    allowed_labels: Vec<String>,
    street_prefix: String,
}

impl RecognizerAdapter {
    pub fn new(allowed_labels: Vec<String>, street_prefix: impl Into<String>) -> Self {
        Self {
            allowed_labels,
            street_prefix: street_prefix.into(),
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            config.effective_allowed_labels(),
            config.effective_street_label_prefix(),
        )
    }

    fn is_street(&self, label: &str) -> bool {
        label.starts_with(self.street_prefix.as_str())
    }

    fn is_allowed(&self, label: &str) -> bool {
        self.is_street(label) || self.allowed_labels.iter().any(|l| l == label)
    }

    /// Run `recognizer` over `text` and return `Recognizer` hits.
    ///
    /// Confidence resolution per entity:
    /// 1. 1.0 for rule-produced or street entities, whatever they scored;
    /// 2. the recognizer's own score;
    /// 3. the rescored value for the exact (start, end, label), else 0.0.
    ///
    /// Rescoring runs at most once per call and only when some kept entity
    /// reaches step 3. Any recognizer failure, including a span that does not
    /// fit `text`, is reported as `RecognizerUnavailable`.
    pub fn detect(
        &self,
        recognizer: &mut dyn EntityRecognizer,
        text: &str,
    ) -> Result<Vec<Hit>, DetectionError> {
        let name = recognizer.name().to_string();
        let entities = recognizer
            .recognize(text)
            .map_err(|e| unavailable(&name, e))?;

        let kept: Vec<RecognizedEntity> = entities
            .into_iter()
            .filter(|e| self.is_allowed(&e.label))
            .collect();

        let mut rescored: Option<HashMap<SpanKey, f64>> = None;
        let mut hits = Vec::with_capacity(kept.len());

        for entity in kept {
            validate_span(text, entity.start, entity.end).map_err(|e| unavailable(&name, e))?;

            let confidence = match entity.raw_confidence {
                _ if entity.rule_id.is_some() || self.is_street(&entity.label) => 1.0,
                Some(raw) => raw,
                None => {
                    if rescored.is_none() {
                        rescored = Some(recognizer.rescore(text).map_err(|e| unavailable(&name, e))?);
                    }
                    rescored
                        .as_ref()
                        .and_then(|m| m.get(&SpanKey::new(entity.start, entity.end, entity.label.as_str())))
                        .copied()
                        .unwrap_or(0.0)
                }
            };

            hits.push(Hit::new(
                entity.start,
                entity.end,
                entity.label,
                HitSource::Recognizer,
                round_confidence(confidence),
            ));
        }

        tracing::debug!(recognizer = %name, hits = hits.len(), "recognizer pass complete");
        Ok(hits)
    }
}

fn unavailable(recognizer: &str, error: DetectionError) -> DetectionError {
    match error {
        e @ DetectionError::RecognizerUnavailable { .. } => e,
        other => DetectionError::RecognizerUnavailable {
            recognizer: recognizer.to_string(),
            reason: other.to_string(),
        },
    }
}

fn round_confidence(value: f64) -> f64 {
    let factor = 10f64.powi(CONFIDENCE_DECIMALS);
    (value * factor).round() / factor
}
