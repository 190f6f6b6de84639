use std::collections::HashMap;

use crate::errors::DetectionError;

/// Entity as reported by a statistical recognizer. Offsets are byte offsets
/// into the text passed to `recognize`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub start: usize,
    pub end: usize,
    pub label: String,
    /// Confidence the recognizer attached itself, if any.
    pub raw_confidence: Option<f64>,
    /// Set when a deterministic sub-rule (e.g. a street-suffix matcher layered
    /// on the model) produced the entity.
    pub rule_id: Option<String>,
}

/// Key for alternative-path rescoring results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpanKey {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl SpanKey {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// Pluggable statistical entity recognizer.
///
/// Instances are not assumed to be shareable across threads; callers hold
/// them behind a pool.
pub trait EntityRecognizer: Send {
    fn name(&self) -> &str;

    fn recognize(&mut self, text: &str) -> Result<Vec<RecognizedEntity>, DetectionError>;

    /// Beam-style alternative scoring keyed by span and label.
    fn rescore(&mut self, _text: &str) -> Result<HashMap<SpanKey, f64>, DetectionError> {
        Ok(HashMap::new())
    }
}
