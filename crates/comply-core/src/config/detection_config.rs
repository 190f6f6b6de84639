//! Detection configuration (Tier-1, Tier-2, manual overrides).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{check_unit_interval, merge_fields};
use crate::constants;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Run the statistical recognizer when one is configured. Default: true.
    pub recognizer_enabled: Option<bool>,
    /// Recognizer labels kept as hits. Default: PER, LOC, PHONE, EMAIL.
    #[serde(default)]
    pub allowed_labels: Vec<String>,
    /// Label prefix of deterministic street matches (always kept, confidence 1.0). Default: "LOC_STR".
    pub street_label_prefix: Option<String>,
    /// Ceiling on the detection floor when the recognizer is unavailable. Default: 0.5.
    pub degraded_confidence_cap: Option<f64>,
    /// Literal phrase → label, matched case-sensitively.
    #[serde(default)]
    pub manual_overrides: BTreeMap<String, String>,
}

impl DetectionConfig {
    pub fn effective_recognizer_enabled(&self) -> bool {
        self.recognizer_enabled.unwrap_or(true)
    }

    pub fn effective_allowed_labels(&self) -> Vec<String> {
        if self.allowed_labels.is_empty() {
            constants::DEFAULT_RECOGNIZER_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.allowed_labels.clone()
        }
    }

    pub fn effective_street_label_prefix(&self) -> &str {
        self.street_label_prefix
            .as_deref()
            .unwrap_or(constants::STREET_LABEL_PREFIX)
    }

    pub fn effective_degraded_confidence_cap(&self) -> f64 {
        self.degraded_confidence_cap.unwrap_or(0.5)
    }

    pub(crate) fn merge_from(&mut self, other: &DetectionConfig) {
        merge_fields!(self, other;
            opt: [recognizer_enabled, street_label_prefix, degraded_confidence_cap];
            coll: [allowed_labels, manual_overrides]);
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval(
            "detection.degraded_confidence_cap",
            self.degraded_confidence_cap,
        )?;
        for (phrase, label) in &self.manual_overrides {
            if phrase.trim().is_empty() || label.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.manual_overrides".to_string(),
                    message: "phrases and labels must be non-empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
